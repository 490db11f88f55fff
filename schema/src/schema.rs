use indexmap::IndexMap;
use serde::Serialize;

/// One field statement of a struct body.
///
/// `dims` is `None` for a scalar field. Array dimensions are stored in
/// declaration order, outer dimension first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name:  String,
    pub type_: String,
    pub dims:  Option<Vec<usize>>,
}

impl Field {
    pub fn scalar(name: &str, type_: &str) -> Self {
        Field {
            name:  name.to_owned(),
            type_: type_.to_owned(),
            dims:  None,
        }
    }

    pub fn array(name: &str, type_: &str, dims: Vec<usize>) -> Self {
        Field {
            name:  name.to_owned(),
            type_: type_.to_owned(),
            dims:  Some(dims),
        }
    }
}

/// A named struct type. `line` and `column` point at the type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub name:   String,
    pub line:   usize,
    pub column: usize,
    pub fields: Vec<Field>,
}

/// Struct types keyed by name, in order of first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    definitions: IndexMap<String, Definition>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition. A later definition with the same name replaces
    /// the earlier one and the replaced definition is returned.
    pub fn insert(&mut self, definition: Definition) -> Option<Definition> {
        self.definitions.insert(definition.name.clone(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn fields(&self, name: &str) -> Option<&[Field]> {
        self.definitions.get(name).map(|def| def.fields.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }
}

impl FromIterator<Definition> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        let mut registry = SchemaRegistry::new();
        for definition in iter {
            registry.insert(definition);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, fields: Vec<Field>) -> Definition {
        Definition { name: name.into(), line: 0, column: 0, fields }
    }

    #[test]
    fn test_last_definition_wins() {
        let mut registry = SchemaRegistry::new();
        registry.insert(def("point", vec![Field::scalar("x", "int")]));
        let replaced = registry.insert(def("point", vec![Field::scalar("y", "int")]));

        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.fields("point").unwrap()[0].name, "y");
    }
}
