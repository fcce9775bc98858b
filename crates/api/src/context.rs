use gatehouse_auth::RequestContext;
use gatehouse_core::{TenantId, UserId};

/// The authorized caller for a request (decision-engine output).
///
/// Inserted into request extensions by the auth middleware; must be present
/// for all protected routes.
#[derive(Debug, Clone)]
pub struct Caller {
    context: RequestContext,
}

impl Caller {
    pub fn new(context: RequestContext) -> Self {
        Self { context }
    }

    pub fn user_id(&self) -> &UserId {
        &self.context.user_id
    }

    /// The active tenant the decision was made under.
    pub fn customer_id(&self) -> &TenantId {
        &self.context.customer_id
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }
}
