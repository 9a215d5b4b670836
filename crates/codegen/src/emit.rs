//! Code emitter: one registration fragment per function or constant.

use bindspec_core::{
    ConstantSpec, ConstantValue, Declaration, Dispatch, FunctionSpec, SpecError,
};

use crate::body;
use crate::error::CodegenError;
use crate::marshal;

/// Indentation of statements inside a binding lambda.
const BODY_INDENT: &str = "        ";

/// One registration emitted into the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Registry key.
    pub name: String,
    pub arity: usize,
    /// Whether a later registration under the same name may replace this one.
    pub allow_override: bool,
    /// Single-line comment placed above the registration.
    pub comment: Option<String>,
    /// Lambda statements following the arity guard, already indented.
    pub statements: String,
}

impl Fragment {
    fn new(name: &str, arity: usize, description: Option<&str>, statements: String) -> Self {
        Fragment {
            name: name.to_string(),
            arity,
            allow_override: true,
            comment: description.and_then(comment_text),
            statements,
        }
    }

    /// C++ source of the registration.
    pub fn text(&self) -> String {
        let key = escape(&self.name);
        let arity = self.arity;
        let mut text = String::new();
        if let Some(comment) = &self.comment {
            text.push_str(&format!("    // {}\n", comment));
        }
        text.push_str(&format!(
            "    R.add_with_policy(\"{key}\", Fn{{\"{key}\", {arity}, [] (const std::vector<Value>& args) -> Value {{\n"
        ));
        text.push_str(&format!(
            "{}if (args.size() != {arity}) throw rlreg::ArityError(\"{}\");\n",
            BODY_INDENT,
            escape(&format!(
                "wrong argument count for {}, expected {}",
                self.name, arity
            ))
        ));
        text.push_str(&self.statements);
        text.push_str(&format!("\n    }}}}, {});", self.allow_override));
        text
    }
}

pub fn emit_declaration(decl: &Declaration) -> Result<Fragment, CodegenError> {
    match decl {
        Declaration::Function(f) => emit_function(f),
        Declaration::Constant(c) => Ok(emit_constant(c)),
    }
}

/// Emit the binding for one function.
///
/// The arity guard always comes first; then either the verbatim custom body
/// or a generated native call with marshaled arguments and result.
pub fn emit_function(spec: &FunctionSpec) -> Result<Fragment, CodegenError> {
    let signature = spec.signature()?;

    let statements = match &spec.dispatch {
        Dispatch::Verbatim { body: text } => {
            body::check_structure(text).map_err(|reason| CodegenError::MalformedBody {
                function: spec.name.clone(),
                reason,
            })?;
            let mut spliced = body::indent(&body::apply_fixups(text.trim_end()), BODY_INDENT);
            if signature.ret.is_void() && !body::ends_with_return(text) {
                spliced.push('\n');
                spliced.push_str(BODY_INDENT);
                spliced.push_str("return Value::nil();");
            }
            spliced
        }
        Dispatch::Native { target } => {
            let args = signature
                .params
                .iter()
                .enumerate()
                .map(|(i, tag)| {
                    marshal::extract(tag, i).ok_or_else(|| SpecError::VoidParameter {
                        function: spec.name.clone(),
                        position: i,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let call = format!("{}({})", target, args.join(", "));
            marshal::construct(&signature.ret, &call)
                .iter()
                .map(|stmt| format!("{}{}", BODY_INDENT, stmt))
                .collect::<Vec<_>>()
                .join("\n")
        }
    };

    Ok(Fragment::new(
        &spec.name,
        spec.arity(),
        spec.description.as_deref(),
        statements,
    ))
}

/// Emit a zero-argument accessor returning the constant's text.
pub fn emit_constant(spec: &ConstantSpec) -> Fragment {
    let text = match spec.value() {
        ConstantValue::Rgba([r, g, b, a]) => format!("{},{},{},{}", r, g, b, a),
        ConstantValue::Text(raw) => raw.to_string(),
    };
    let statement = format!(
        "{}return Value::from_string(\"{}\");",
        BODY_INDENT,
        escape(&text)
    );
    Fragment::new(&spec.name, 0, spec.description.as_deref(), statement)
}

/// Collapse a description onto one comment line. Trailing backslashes are
/// dropped, since they would splice the next source line into the comment.
fn comment_text(description: &str) -> Option<String> {
    let one_line = description.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = one_line.trim_end_matches(|c: char| c == '\\' || c.is_whitespace());
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Escape `s` for use inside a C++ string literal.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
