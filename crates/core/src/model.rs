//! Spec document data model.
//!
//! `Raw*` structs mirror the on-disk document shape (including the field
//! aliases used by older spec files); [`SpecDocument::from_raw`] turns them
//! into the validated model the rest of the pipeline consumes.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::SpecError;
use crate::types::{Signature, TypeTag};

/// Where a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub file: String,
}

// ── On-disk shape ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawDocument {
    pub imports: Vec<String>,
    pub functions: Vec<RawFunction>,
    pub constants: Vec<RawConstant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFunction {
    pub name: String,
    #[serde(alias = "native_name", alias = "nativeName")]
    pub target: Option<String>,
    pub map_to: Option<String>,
    pub raylib_name: Option<String>,
    #[serde(default, alias = "args")]
    pub params: Vec<String>,
    #[serde(rename = "returnType", alias = "return_type", alias = "ret")]
    pub return_type: Option<String>,
    #[serde(rename = "customBody", alias = "custom_body")]
    pub custom_body: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawConstant {
    pub name: String,
    #[serde(rename = "rawValue", alias = "raw_value", alias = "value")]
    pub raw_value: RawScalar,
    pub description: Option<String>,
}

/// Constant values are surfaced as text. Unquoted integers and booleans
/// read back unchanged and are accepted; an unquoted float may not (`1.0`
/// would come back as `1`), so it is rejected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawScalar {
    /// The value's text, or the float that has no exact text.
    fn into_text(self) -> Result<String, f64> {
        match self {
            RawScalar::Text(s) => Ok(s),
            RawScalar::Int(i) => Ok(i.to_string()),
            RawScalar::Bool(b) => Ok(b.to_string()),
            RawScalar::Float(x) => Err(x),
        }
    }
}

// ── Validated model ──────────────────────────────────────────────────

/// How a binding reaches native code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Generated call to a native symbol.
    Native { target: String },
    /// Hand-written body spliced verbatim after the arity guard.
    Verbatim { body: String },
}

/// One function binding declared in a spec document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub dispatch: Dispatch,
    /// Parameter type tags exactly as written; resolved by [`FunctionSpec::signature`].
    pub params: Vec<String>,
    pub return_type: String,
    pub description: Option<String>,
    pub prov: Provenance,
}

impl FunctionSpec {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Native symbol this binding calls, if it is not a custom body.
    pub fn target(&self) -> Option<&str> {
        match &self.dispatch {
            Dispatch::Native { target } => Some(target),
            Dispatch::Verbatim { .. } => None,
        }
    }

    /// Resolve every declared tag through the type table.
    pub fn signature(&self) -> Result<Signature, SpecError> {
        let params = self
            .params
            .iter()
            .enumerate()
            .map(|(position, tag)| match TypeTag::lookup(&self.name, tag)? {
                TypeTag::Void => Err(SpecError::VoidParameter {
                    function: self.name.clone(),
                    position,
                }),
                resolved => Ok(resolved),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ret = TypeTag::lookup(&self.name, &self.return_type)?;
        Ok(Signature { params, ret })
    }
}

/// A named constant exposed as a zero-argument accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSpec {
    pub name: String,
    pub raw_value: String,
    pub description: Option<String>,
    pub prov: Provenance,
}

/// Classification of a constant's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantValue<'a> {
    /// Exactly four comma-separated channels, e.g. `230,41,55,255`.
    Rgba([&'a str; 4]),
    Text(&'a str),
}

impl ConstantSpec {
    /// No numeric validation happens here: any four components count as a color.
    pub fn value(&self) -> ConstantValue<'_> {
        let parts: Vec<&str> = self.raw_value.split(',').collect();
        match parts.as_slice() {
            [r, g, b, a] => ConstantValue::Rgba([*r, *g, *b, *a]),
            _ => ConstantValue::Text(&self.raw_value),
        }
    }
}

/// A function or constant, in document encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Function(FunctionSpec),
    Constant(ConstantSpec),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(f) => &f.name,
            Declaration::Constant(c) => &c.name,
        }
    }

    pub fn prov(&self) -> &Provenance {
        match self {
            Declaration::Function(f) => &f.prov,
            Declaration::Constant(c) => &c.prov,
        }
    }
}

/// One parsed spec document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecDocument {
    pub imports: Vec<String>,
    pub functions: Vec<FunctionSpec>,
    pub constants: Vec<ConstantSpec>,
}

impl SpecDocument {
    pub(crate) fn from_raw(raw: RawDocument, file: &str) -> Result<Self, SpecError> {
        let prov = Provenance {
            file: file.to_owned(),
        };

        let functions = raw
            .functions
            .into_iter()
            .map(|f| {
                // A custom body takes precedence over any declared target.
                let dispatch = match (f.custom_body, f.target.or(f.map_to).or(f.raylib_name)) {
                    (Some(body), _) => Dispatch::Verbatim { body },
                    (None, Some(target)) => Dispatch::Native { target },
                    (None, None) => {
                        return Err(SpecError::MissingTarget {
                            function: f.name,
                            file: file.to_owned(),
                        })
                    }
                };
                Ok(FunctionSpec {
                    name: f.name,
                    dispatch,
                    params: f.params,
                    return_type: f.return_type.unwrap_or_else(|| "void".to_string()),
                    description: f.description,
                    prov: prov.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let constants = raw
            .constants
            .into_iter()
            .map(|c| {
                let raw_value = c.raw_value.into_text().map_err(|x| SpecError::Parse {
                    path: PathBuf::from(file),
                    message: format!(
                        "constant '{}' has unquoted float value {}; quote it to keep its text",
                        c.name, x
                    ),
                })?;
                Ok(ConstantSpec {
                    name: c.name,
                    raw_value,
                    description: c.description,
                    prov: prov.clone(),
                })
            })
            .collect::<Result<Vec<_>, SpecError>>()?;

        Ok(SpecDocument {
            imports: raw.imports,
            functions,
            constants,
        })
    }

    /// Own declarations in emission order: functions first, then constants.
    pub fn into_declarations(self) -> impl Iterator<Item = Declaration> {
        self.functions
            .into_iter()
            .map(Declaration::Function)
            .chain(self.constants.into_iter().map(Declaration::Constant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_fn(name: &str) -> RawFunction {
        RawFunction {
            name: name.to_string(),
            target: None,
            map_to: None,
            raylib_name: None,
            params: vec![],
            return_type: None,
            custom_body: None,
            description: None,
        }
    }

    fn constant(raw: &str) -> ConstantSpec {
        ConstantSpec {
            name: "C".to_string(),
            raw_value: raw.to_string(),
            description: None,
            prov: Provenance {
                file: "c.yaml".to_string(),
            },
        }
    }

    #[test]
    fn target_prefers_target_then_map_to_then_raylib_name() {
        let mut f = raw_fn("DrawIt");
        f.map_to = Some("DrawMapped".to_string());
        f.raylib_name = Some("DrawRaylib".to_string());
        let doc = SpecDocument::from_raw(
            RawDocument {
                functions: vec![f],
                ..Default::default()
            },
            "a.yaml",
        )
        .unwrap();
        assert_eq!(doc.functions[0].target(), Some("DrawMapped"));
        assert_eq!(doc.functions[0].return_type, "void");
    }

    #[test]
    fn custom_body_wins_over_target() {
        let mut f = raw_fn("Helper");
        f.map_to = Some("Native".to_string());
        f.custom_body = Some("return Value::nil();".to_string());
        let doc = SpecDocument::from_raw(
            RawDocument {
                functions: vec![f],
                ..Default::default()
            },
            "a.yaml",
        )
        .unwrap();
        assert!(matches!(
            doc.functions[0].dispatch,
            Dispatch::Verbatim { .. }
        ));
        assert_eq!(doc.functions[0].target(), None);
    }

    #[test]
    fn function_without_target_or_body_is_rejected() {
        let err = SpecDocument::from_raw(
            RawDocument {
                functions: vec![raw_fn("Orphan")],
                ..Default::default()
            },
            "a.yaml",
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::MissingTarget { ref function, .. } if function == "Orphan"));
    }

    #[test]
    fn four_components_classify_as_rgba() {
        let c = constant("255,0,0,255");
        assert_eq!(c.value(), ConstantValue::Rgba(["255", "0", "0", "255"]));
    }

    #[test]
    fn other_shapes_classify_as_text() {
        assert_eq!(constant("SOME_VALUE").value(), ConstantValue::Text("SOME_VALUE"));
        assert_eq!(constant("1,2,3").value(), ConstantValue::Text("1,2,3"));
        assert_eq!(constant("1,2,3,4,5").value(), ConstantValue::Text("1,2,3,4,5"));
    }

    #[test]
    fn signature_rejects_void_parameter() {
        let doc = SpecDocument::from_raw(
            RawDocument {
                functions: vec![RawFunction {
                    params: vec!["int".to_string(), "void".to_string()],
                    map_to: Some("Native".to_string()),
                    ..raw_fn("Bad")
                }],
                ..Default::default()
            },
            "a.yaml",
        )
        .unwrap();
        let err = doc.functions[0].signature().unwrap_err();
        assert!(matches!(err, SpecError::VoidParameter { position: 1, .. }));
    }

    #[test]
    fn scalar_text_is_kept_verbatim() {
        assert_eq!(RawScalar::Text("1.50".to_string()).into_text(), Ok("1.50".to_string()));
        assert_eq!(RawScalar::Int(42).into_text(), Ok("42".to_string()));
        assert_eq!(RawScalar::Bool(true).into_text(), Ok("true".to_string()));
    }

    #[test]
    fn unquoted_float_constant_is_rejected() {
        let err = SpecDocument::from_raw(
            RawDocument {
                constants: vec![RawConstant {
                    name: "HALF".to_string(),
                    raw_value: RawScalar::Float(1.5),
                    description: None,
                }],
                ..Default::default()
            },
            "consts.yaml",
        )
        .unwrap_err();
        match err {
            SpecError::Parse { path, message } => {
                assert_eq!(path, PathBuf::from("consts.yaml"));
                assert!(message.contains("'HALF'"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
