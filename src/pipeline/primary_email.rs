//! Default resolvers matching addresses against a person's primary e-mail.

use tracing::{debug, info};

use super::address::other_recipients;
use super::{ContactDirectory, MessageContext, Resolver, Verdict};
use crate::error::PipelineError;
use crate::models::UnknownCaller;

pub const CALLER_PRECEDENCE: i32 = 110;
pub const RECIPIENTS_PRECEDENCE: i32 = 115;

/// Sets the caller to the one person whose primary e-mail is the sender.
///
/// When nobody (or more than one person) matches, the mailbox's
/// `unknown_caller` setting decides whether processing continues.
pub struct CallerByPrimaryEmail;

impl Resolver for CallerByPrimaryEmail {
    fn id(&self) -> &'static str {
        "find_caller"
    }

    fn precedence(&self) -> i32 {
        CALLER_PRECEDENCE
    }

    fn resolve(
        &self,
        directory: &dyn ContactDirectory,
        ctx: &mut MessageContext<'_>,
    ) -> Result<Verdict, PipelineError> {
        if ctx.message.has_caller() {
            debug!("caller already determined, skipping");
            return Ok(Verdict::Continue);
        }

        let mut persons = directory.find_persons_by_email(&ctx.message.sender)?;
        if persons.len() == 1 {
            let person = persons.remove(0);
            info!(caller = %person.friendly_name(), "caller identified by primary e-mail");
            ctx.message.set_caller(person);
            return Ok(Verdict::Continue);
        }

        debug!(matches = persons.len(), "caller not identified");
        match ctx.mailbox.unknown_caller {
            UnknownCaller::Ignore => Ok(Verdict::Continue),
            UnknownCaller::Reject => Ok(Verdict::Halt(format!(
                "unknown caller {}",
                ctx.message.sender
            ))),
        }
    }
}

/// Adds every other To/Cc recipient matching exactly one person's primary
/// e-mail to the message's additional contacts.
pub struct RecipientsByPrimaryEmail;

impl Resolver for RecipientsByPrimaryEmail {
    fn id(&self) -> &'static str {
        "find_additional_contacts"
    }

    fn precedence(&self) -> i32 {
        RECIPIENTS_PRECEDENCE
    }

    fn resolve(
        &self,
        directory: &dyn ContactDirectory,
        ctx: &mut MessageContext<'_>,
    ) -> Result<Verdict, PipelineError> {
        let candidates = other_recipients(ctx.message, ctx.mailbox, ctx.ticket);
        let caller_id = ctx.message.resolved_caller().map(|p| p.id);

        for address in &candidates {
            let mut persons = directory.find_persons_by_email(address)?;
            if persons.len() != 1 {
                debug!(%address, matches = persons.len(), "no unique person for recipient");
                continue;
            }

            let person = persons.remove(0);
            if Some(person.id) == caller_id {
                continue;
            }
            if ctx.message.add_contact(person) {
                debug!(%address, "additional contact linked");
            }
        }

        Ok(Verdict::Continue)
    }
}
