/* 📖 # Why is Message a move-only type?

A greeting is allocated once by the formatter and released once by whoever holds it last.
Message has no Clone and no way to get the buffer out except by consuming it, so:
- the formatter keeps no reference after returning it
- release happens exactly once, when the value is dropped or `release`d
- reading after release, or releasing twice, does not compile

The caller never has to remember to free anything, including on early-return paths.
*/

use std::fmt;
use std::io::Write;

use greeter_base::{GreeterError, GreeterResult, Heap, ResultExt, SystemHeap};
use tracing::{instrument, trace};

/// Fixed text every greeting starts with.
pub const GREETING_PREFIX: &str = "Hello, ";

/// An owned, heap-allocated greeting.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Message {
    text: String,
}

impl Message {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Give up the Message and take its buffer.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Release the allocation now rather than at end of scope.
    pub fn release(self) {
        trace!(len = self.text.len(), "releasing message");
        drop(self);
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Greet `name` using the system heap.
///
/// ```
/// let message = greeter_engine::generate_message("world").unwrap();
/// assert_eq!(message.as_str(), "Hello, world");
/// ```
pub fn generate_message(name: &str) -> GreeterResult<Message> {
    generate_message_in(&SystemHeap, name)
}

/// Greet `name`, allocating the result through `heap`.
///
/// Performs exactly one allocation, sized for the whole greeting up front, so
/// either a complete Message is returned or nothing was allocated.
#[instrument(level = "debug", skip(heap, name), fields(name_len = name.len()))]
pub fn generate_message_in(heap: &dyn Heap, name: &str) -> GreeterResult<Message> {
    let capacity = GREETING_PREFIX
        .len()
        .checked_add(name.len())
        .ok_or_else(|| Box::new(GreeterError::invalid_input("name is too long to greet")))?;
    let mut text = heap
        .allocate_string(capacity)
        .context("formatting greeting")?;
    text.push_str(GREETING_PREFIX);
    text.push_str(name);
    trace!(len = text.len(), "message generated");
    Ok(Message { text })
}

/// Generate a greeting for `name` and write it to `out` followed by a newline.
///
/// Nothing is written unless the greeting was generated in full.
pub fn write_greeting(heap: &dyn Heap, name: &str, out: &mut dyn Write) -> GreeterResult<()> {
    let message = generate_message_in(heap, name)?;
    writeln!(out, "{}", message)
        .and_then(|()| out.flush())
        .map_err(|e| greeter_base::err!("Failed to write greeting: {}", e))?;
    message.release();
    Ok(())
}
