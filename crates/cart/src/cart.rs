use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cartbundle_core::{Aggregate, AggregateRoot, DomainError, ProductId, SessionId};
use cartbundle_events::Event;

use crate::CartLine;

/// Aggregate root: Cart (one per customer session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    /// Create an empty cart for a session.
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_for(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line_for(product_id).is_some()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
}

/// Event: LineAdded (first unit(s) of a product in this cart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineQuantityIncreased (product already had a line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineQuantityIncreased {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub added: u32,
    pub new_quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    LineAdded(LineAdded),
    LineQuantityIncreased(LineQuantityIncreased),
}

impl CartEvent {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartEvent::LineAdded(e) => e.product_id,
            CartEvent::LineQuantityIncreased(e) => e.product_id,
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "cart.line.added",
            CartEvent::LineQuantityIncreased(_) => "cart.line.quantity_increased",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::LineAdded(e) => e.occurred_at,
            CartEvent::LineQuantityIncreased(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded(e) => {
                self.lines.push(CartLine::new(e.product_id, e.quantity));
            }
            CartEvent::LineQuantityIncreased(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == e.product_id) {
                    line.quantity = e.new_quantity;
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
        }
    }
}

impl Cart {
    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        if cmd.session_id != self.id {
            return Err(DomainError::invariant("session_id mismatch"));
        }

        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let event = match self.line_for(cmd.product_id) {
            Some(line) => {
                let new_quantity = line
                    .quantity
                    .checked_add(cmd.quantity)
                    .ok_or_else(|| DomainError::validation("line quantity overflow"))?;
                CartEvent::LineQuantityIncreased(LineQuantityIncreased {
                    session_id: cmd.session_id,
                    product_id: cmd.product_id,
                    added: cmd.quantity,
                    new_quantity,
                    occurred_at: cmd.occurred_at,
                })
            }
            None => CartEvent::LineAdded(LineAdded {
                session_id: cmd.session_id,
                product_id: cmd.product_id,
                quantity: cmd.quantity,
                occurred_at: cmd.occurred_at,
            }),
        };

        Ok(vec![event])
    }
}
