//! Canned generative model for unit tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::domain::image::InlineImage;
use crate::domain::model::GenerativeModel;
use crate::error::{AiError, AiResult};

type Reply = Box<dyn Fn() -> AiResult<String> + Send + Sync>;

pub struct StubModel {
    reply: Reply,
    calls: AtomicUsize,
    saw_image: AtomicBool,
    last_prompt: Mutex<String>,
}

impl StubModel {
    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            saw_image: AtomicBool::new(false),
            last_prompt: Mutex::new(String::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with(Box::new(move || Ok(text.clone())))
    }

    pub fn failing(make: fn() -> AiError) -> Self {
        Self::with(Box::new(move || Err(make())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn saw_image(&self) -> bool {
        self.saw_image.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl GenerativeModel for StubModel {
    async fn generate(&self, prompt: &str, image: Option<&InlineImage>) -> AiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image.is_some() {
            self.saw_image.store(true, Ordering::SeqCst);
        }
        *self.last_prompt.lock().unwrap() = prompt.to_string();
        (self.reply)()
    }
}
