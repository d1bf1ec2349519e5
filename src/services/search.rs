// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Debounce for the free-text search box.
//!
//! Only search input is debounced; every other filter edit applies at once.
//! A zero delay disables debouncing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }

    /// Record a keystroke. Returns the text right away if not debouncing.
    pub fn input(&mut self, text: String, now: Instant) -> Option<String> {
        if self.is_immediate() {
            self.pending = None;
            return Some(text);
        }
        self.pending = Some((text, now + self.delay));
        None
    }

    /// Text whose quiet period has elapsed, if any.
    pub fn flush(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
