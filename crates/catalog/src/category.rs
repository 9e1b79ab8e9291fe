use serde::{Deserialize, Serialize};

use cartbundle_core::{CategoryId, DomainError, DomainResult, Entity};

/// A product category. Categories form a tree through `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    parent: Option<CategoryId>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            parent: None,
        })
    }

    pub fn with_parent(mut self, parent: CategoryId) -> DomainResult<Self> {
        if parent == self.id {
            return Err(DomainError::invariant("category cannot be its own parent"));
        }
        self.parent = Some(parent);
        Ok(self)
    }

    pub fn id_typed(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
