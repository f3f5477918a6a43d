//! Precedence-ordered resolution of the people behind an inbound message.
//!
//! Every inbound message passes once through an ordered list of resolvers:
//! 1. `CallerByContactMethod` (109): sender matched against contact methods
//! 2. `CallerByPrimaryEmail` (110): sender matched against primary e-mails
//! 3. `RecipientsByContactMethod` (114): To/Cc matched against contact methods
//! 4. `RecipientsByPrimaryEmail` (115): To/Cc matched against primary e-mails
//!
//! The contact-method resolvers only refresh a person's primary e-mail (and
//! set the caller), so the primary-email resolvers that follow pick those
//! persons up.

pub mod address;
pub mod contact_method;
pub mod directory;
pub mod primary_email;

use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::error::PipelineError;
use crate::models::{InboundMessage, Mailbox, Ticket};

pub use contact_method::{CallerByContactMethod, RecipientsByContactMethod};
pub use directory::ContactDirectory;
pub use primary_email::{CallerByPrimaryEmail, RecipientsByPrimaryEmail};

/// Optional features of the contact store, checked once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub contact_methods: bool,
}

/// Everything a resolver sees for the message being processed.
pub struct MessageContext<'a> {
    pub message: &'a mut InboundMessage,
    pub mailbox: &'a Mailbox,
    /// Present when the message replies to an existing ticket.
    pub ticket: Option<&'a Ticket>,
    pub capabilities: Capabilities,
}

/// Whether processing goes on after a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Halt(String),
}

/// One member of the pipeline.
pub trait Resolver {
    /// Short identifier used in logs and reports.
    fn id(&self) -> &'static str;

    /// Lower runs first. Need not be unique.
    fn precedence(&self) -> i32;

    fn resolve(
        &self,
        directory: &dyn ContactDirectory,
        ctx: &mut MessageContext<'_>,
    ) -> Result<Verdict, PipelineError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Halted {
    pub step: &'static str,
    pub reason: String,
}

/// What happened during one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Ids of the resolvers that ran, in order.
    pub steps: Vec<&'static str>,
    pub halted: Option<Halted>,
}

impl PipelineReport {
    pub fn completed(&self) -> bool {
        self.halted.is_none()
    }
}

/// Resolvers ordered by ascending precedence; equal precedence keeps registration order.
#[derive(Default)]
pub struct Pipeline {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contact-method resolvers followed by the primary-email defaults.
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.register(CallerByContactMethod);
        pipeline.register(CallerByPrimaryEmail);
        pipeline.register(RecipientsByContactMethod);
        pipeline.register(RecipientsByPrimaryEmail);
        pipeline
    }

    pub fn register<R: Resolver + 'static>(&mut self, resolver: R) -> &mut Self {
        self.resolvers.push(Box::new(resolver));
        self.resolvers.sort_by_key(|r| r.precedence());
        self
    }

    /// Resolver ids in execution order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.id()).collect()
    }

    /// Run every resolver once against `message`, stopping early on a halt.
    pub fn run(
        &self,
        directory: &dyn ContactDirectory,
        message: &mut InboundMessage,
        mailbox: &Mailbox,
        ticket: Option<&Ticket>,
    ) -> Result<PipelineReport, PipelineError> {
        let span = info_span!("pipeline", sender = %message.sender, mailbox = %mailbox.login);
        let _guard = span.enter();

        let capabilities = Capabilities {
            contact_methods: directory.has_contact_methods()?,
        };
        debug!(?capabilities, "detected capabilities");

        let mut ctx = MessageContext {
            message,
            mailbox,
            ticket,
            capabilities,
        };
        let mut report = PipelineReport::default();

        for resolver in &self.resolvers {
            debug!(step = resolver.id(), precedence = resolver.precedence(), "running");
            report.steps.push(resolver.id());

            if let Verdict::Halt(reason) = resolver.resolve(directory, &mut ctx)? {
                info!(step = resolver.id(), %reason, "processing halted");
                report.halted = Some(Halted {
                    step: resolver.id(),
                    reason,
                });
                break;
            }
        }

        Ok(report)
    }
}
