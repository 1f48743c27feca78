//! `agentboard kinds` — List the message kinds agents can post.

use agentboard_core::MessageKind;

pub fn run() {
    for kind in MessageKind::ALL {
        println!("{kind}");
    }
}
