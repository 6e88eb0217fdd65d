use tokio::task::JoinHandle;
use crate::fetcher::{self, FetchOutcome, HfClient};

/// A single transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
    /// A fallback reply; rendered distinctly so it cannot pass for model output
    Error,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub messages: Vec<Message>,

    // Input state
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars
    pub busy: bool,
    pub pending: Option<JoinHandle<FetchOutcome>>,

    // Chat viewport state
    pub scroll: u16,
    pub chat_height: u16, // inner height of the chat area, set during render
    pub chat_width: u16,  // inner width, for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Remote endpoint
    pub client: HfClient,
    pub model: String,
}

impl App {
    pub fn new(client: HfClient, model: String) -> Self {
        Self {
            should_quit: false,
            messages: Vec::new(),
            input: String::new(),
            cursor: 0,
            busy: false,
            pending: None,
            scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
            client,
            model,
        }
    }

    /// Submit the current draft. No-op when the trimmed draft is empty or a
    /// fetch is already in flight, so at most one request is outstanding.
    pub fn submit(&mut self) {
        let utterance = self.input.trim().to_string();
        if utterance.is_empty() || self.busy {
            return;
        }

        self.messages.push(Message {
            text: utterance.clone(),
            sender: Sender::User,
        });
        self.input.clear();
        self.cursor = 0;
        self.busy = true;

        // Scroll so the "Thinking..." row is visible
        self.scroll_to_bottom();

        let client = self.client.clone();
        self.pending = Some(tokio::spawn(async move { client.fetch(&utterance).await }));
    }

    /// Append the reply once the in-flight fetch has finished. Called from
    /// the run loop; the tick timer guarantees it runs at least every 300ms.
    pub async fn poll_response(&mut self) {
        let finished = self.pending.as_ref().map_or(false, |t| t.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.pending.take() {
            let message = match task.await {
                Ok(FetchOutcome::Reply(text)) => Message {
                    text,
                    sender: Sender::Ai,
                },
                Ok(FetchOutcome::Fallback { text, .. }) => Message {
                    text,
                    sender: Sender::Error,
                },
                Err(e) => {
                    // A panicked fetch task is treated like a failed fetch
                    tracing::warn!("fetch task failed to join: {e}");
                    let utterance = self
                        .messages
                        .iter()
                        .rev()
                        .find(|m| m.sender == Sender::User)
                        .map(|m| m.text.clone())
                        .unwrap_or_default();
                    Message {
                        text: fetcher::fallback_text(&utterance),
                        sender: Sender::Error,
                    }
                }
            };

            self.messages.push(message);
            self.busy = false;
            self.scroll_to_bottom();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.busy {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Scroll the chat viewport to the newest entry
    pub fn scroll_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.messages {
            total_lines += 1; // Role line ("You:" or "AI:")
            for line in msg.text.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.busy {
            total_lines += 2; // "AI:" + "Thinking..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.scroll = total_lines.saturating_sub(visible_height);
        } else {
            self.scroll = 0;
        }
    }
}
