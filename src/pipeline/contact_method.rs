//! Resolvers that find callers and additional contacts through contact methods.
//!
//! An address shared by several contact methods is ambiguous and left alone;
//! only a unique match refreshes the linked person's primary e-mail.

use tracing::{debug, info, warn};

use super::address::other_recipients;
use super::{ContactDirectory, MessageContext, Resolver, Verdict};
use crate::error::{DatabaseError, PipelineError};
use crate::models::{MethodKind, Person};

/// Runs before `CallerByPrimaryEmail` (110).
pub const CALLER_PRECEDENCE: i32 = 109;
/// Runs before `RecipientsByPrimaryEmail` (115).
pub const RECIPIENTS_PRECEDENCE: i32 = 114;

/// Looks up `address` as an e-mail contact method. On a unique match the linked
/// person's primary e-mail becomes the matched detail and the person is returned.
fn refresh_from_unique_match(
    directory: &dyn ContactDirectory,
    address: &str,
) -> Result<Option<Person>, DatabaseError> {
    let methods = directory.find_contact_methods(MethodKind::Email, address)?;

    let method = match methods.as_slice() {
        [] => {
            debug!(%address, "no contact method found");
            return Ok(None);
        }
        [method] => method,
        _ => {
            debug!(%address, count = methods.len(), "several contact methods found, skipping");
            return Ok(None);
        }
    };
    debug!(%address, method_id = %method.id, "contact method found");

    let Some(mut person) = directory.get_person(method.person_id)? else {
        warn!(
            method_id = %method.id,
            person_id = %method.person_id,
            "contact method points to a missing or inactive person"
        );
        return Ok(None);
    };

    if person.email.as_deref() == Some(method.detail.as_str()) {
        debug!(person = %person.friendly_name(), "primary e-mail already up to date");
    } else {
        directory.update_person_email(person.id, &method.detail)?;
        info!(
            person = %person.friendly_name(),
            email = %method.detail,
            "primary e-mail set from contact method"
        );
        person.email = Some(method.detail.clone());
    }

    Ok(Some(person))
}

/// Identifies the caller by matching the sender against contact methods.
pub struct CallerByContactMethod;

impl Resolver for CallerByContactMethod {
    fn id(&self) -> &'static str {
        "find_caller_by_contact_method"
    }

    fn precedence(&self) -> i32 {
        CALLER_PRECEDENCE
    }

    fn resolve(
        &self,
        directory: &dyn ContactDirectory,
        ctx: &mut MessageContext<'_>,
    ) -> Result<Verdict, PipelineError> {
        if !ctx.capabilities.contact_methods {
            debug!("contact methods not installed, skipping");
            return Ok(Verdict::Continue);
        }

        if ctx.message.has_caller() {
            debug!("caller already determined, skipping");
            return Ok(Verdict::Continue);
        }

        match refresh_from_unique_match(directory, &ctx.message.sender)? {
            Some(person) => {
                info!(caller = %person.friendly_name(), "caller identified by contact method");
                ctx.message.set_caller(person);
            }
            None => debug!("caller not identified (or without enough certainty)"),
        }

        Ok(Verdict::Continue)
    }
}

/// Refreshes the primary e-mail of every To/Cc recipient that uniquely matches
/// a contact method, so later matching on primary e-mail finds them.
pub struct RecipientsByContactMethod;

impl Resolver for RecipientsByContactMethod {
    fn id(&self) -> &'static str {
        "find_additional_contacts_by_contact_method"
    }

    fn precedence(&self) -> i32 {
        RECIPIENTS_PRECEDENCE
    }

    fn resolve(
        &self,
        directory: &dyn ContactDirectory,
        ctx: &mut MessageContext<'_>,
    ) -> Result<Verdict, PipelineError> {
        if !ctx.capabilities.contact_methods {
            debug!("contact methods not installed, skipping");
            return Ok(Verdict::Continue);
        }

        let candidates = other_recipients(ctx.message, ctx.mailbox, ctx.ticket);
        debug!(count = candidates.len(), "recipients to look up");

        for address in &candidates {
            if let Some(person) = refresh_from_unique_match(directory, address)? {
                if ctx.message.refresh_person(&person) {
                    debug!(person = %person.friendly_name(), "refreshed person already linked to message");
                }
            }
        }

        Ok(Verdict::Continue)
    }
}
