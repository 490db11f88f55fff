use std::collections::HashMap;
use crate::error::RestructError;
use restruct_schema::SchemaRegistry;

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    InProgress,
    Done,
}

/// Returns `Err(RestructError::RecursiveType(_))` if any struct contains itself,
/// directly or through other structs. Fixed-size arrays count as containment.
pub fn verify_registry(registry: &SchemaRegistry) -> Result<(), RestructError> {
    let mut state: HashMap<&str, Visit> = HashMap::new();

    fn check_recursion<'a>(
        name: &'a str,
        registry: &'a SchemaRegistry,
        state: &mut HashMap<&'a str, Visit>,
    ) -> Result<(), RestructError> {
        let Some(definition) = registry.get(name) else {
            return Ok(());
        };
        match state.get(name) {
            Some(Visit::InProgress) => return Err(RestructError::RecursiveType(name.to_owned())),
            Some(Visit::Done) => return Ok(()),
            None => {}
        }
        state.insert(name, Visit::InProgress);
        for field in &definition.fields {
            check_recursion(&field.type_, registry, state)?;
        }
        state.insert(name, Visit::Done);
        Ok(())
    }

    for def in registry.definitions() {
        check_recursion(&def.name, registry, &mut state)?;
    }

    Ok(())
}
