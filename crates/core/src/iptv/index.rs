//! Join of the stream list onto channel identifiers.

use std::collections::HashMap;

use super::types::Stream;

/// Streams grouped by channel id, in the order they appear upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelStreamIndex {
    streams: HashMap<String, Vec<Stream>>,
}

impl ChannelStreamIndex {
    /// Build the index in a single pass. Streams without a channel are skipped.
    pub fn build(streams: &[Stream]) -> Self {
        let mut index: HashMap<String, Vec<Stream>> = HashMap::new();
        for stream in streams {
            match stream.channel.as_deref() {
                Some(channel_id) if !channel_id.is_empty() => {
                    index
                        .entry(channel_id.to_string())
                        .or_default()
                        .push(stream.clone());
                }
                _ => {}
            }
        }
        Self { streams: index }
    }

    /// All streams for a channel, empty if none are known.
    pub fn streams_for(&self, channel_id: &str) -> &[Stream] {
        self.streams
            .get(channel_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of channels with at least one stream.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
