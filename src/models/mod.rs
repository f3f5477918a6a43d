mod contact_method;
mod mailbox;
mod message;
mod person;
mod ticket;

pub use contact_method::{ContactMethod, MethodKind};
pub use mailbox::{Mailbox, UnknownCaller};
pub use message::{InboundMessage, Recipient};
pub use person::Person;
pub use ticket::Ticket;
