//! bindspec-codegen: turns validated declarations into C++ registration code.
//!
//! Each function becomes a lambda registered with the runtime's function
//! registry: an arity guard, then marshaled arguments, the native call and
//! a wrapped result (or a verbatim custom body). Constants become
//! zero-argument accessors. [`GeneratedModule`] wraps the fragments in the
//! fixed preamble and postamble.

pub mod body;
pub mod emit;
pub mod error;
pub mod marshal;
pub mod module;
pub mod resources;

pub use emit::{emit_constant, emit_declaration, emit_function, Fragment};
pub use error::CodegenError;
pub use module::GeneratedModule;
pub use resources::ResourceKind;

use bindspec_core::Declaration;

/// Emit every declaration, in order, into a new module.
pub fn generate<'a, I>(declarations: I) -> Result<GeneratedModule, CodegenError>
where
    I: IntoIterator<Item = &'a Declaration>,
{
    let mut module = GeneratedModule::new();
    for decl in declarations {
        module.push(emit_declaration(decl)?);
    }
    Ok(module)
}
