use crate::advisor::Advisor;
use crate::assistants::AssistantsService;
use std::sync::Arc;

pub(crate) struct ServerState<S: AssistantsService> {
    advisor: Arc<Advisor<S>>,
}

impl<S: AssistantsService> ServerState<S> {
    pub(crate) fn new(advisor: Arc<Advisor<S>>) -> Self {
        Self { advisor }
    }

    pub(crate) fn advisor(&self) -> Arc<Advisor<S>> {
        Arc::clone(&self.advisor)
    }
}
