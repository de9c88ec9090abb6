use std::collections::VecDeque;
use std::sync::Mutex;

use acervo_core::errors::ReasoningError;
use acervo_core::traits::IReasoner;

/// A reasoner that replays a scripted queue of responses in order.
/// An exhausted queue fails, which doubles as failure injection.
#[derive(Default)]
pub struct ScriptedReasoner {
    responses: Mutex<VecDeque<Result<String, String>>>,
    /// Prompts seen, for asserting what the engine asked.
    prompts: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push(&self, response: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Ok(response.into()));
        self
    }

    /// Queue a failure.
    pub fn push_failure(&self, reason: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(reason.into()));
        self
    }

    /// Prompts the engine sent so far.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().expect("responses lock").len()
    }
}

impl IReasoner for ScriptedReasoner {
    fn complete(
        &self,
        prompt: &str,
        _temperature: f64,
        _max_tokens: usize,
    ) -> Result<String, ReasoningError> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        match self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
        {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(ReasoningError::CompletionFailed { reason }),
            None => Err(ReasoningError::CompletionFailed {
                reason: "script exhausted".into(),
            }),
        }
    }
}
