//! Concierge persona and prompt assembly.
//!
//! The texts here are fixture data: guests and the rest of the site rely on
//! their exact wording.

use crate::backend::PromptTurn;
use hotel_jina_conversation::{Message, Sender};

/// Persona and facts the remote model is primed with.
pub const HOTEL_CONTEXT: &str = r#"
You are Jina, the AI Concierge for Hotel Jina, a luxury hotel in Silchar, Assam.
Hotel Details:
- Address: Malugram, Silchar, Assam 788002.
- Contact: +91 95312 73486, m.nath190702@gmail.com.
- Rooms: 
  1. Executive Room (375 sq ft, King Bed, City View) - ₹3,500/night.
  2. Luxury Suite (420 sq ft, Living Area, Bathtub) - ₹5,200/night.
  3. Classic Double (172 sq ft, Twin/Double) - ₹2,800/night.
- Amenities: Free Valet Parking, High-Speed Wifi, In-room Dining, Restaurant (7AM-10:30PM), Bar/Lounge (11AM-10PM), 24/7 Front Desk.
- Location Highlights: Near heart of Silchar city.
Your Goal: Answer guest questions politely, professionally, and concisely. If they want to book, tell them to click the "Book Now" button in the navigation. You can also suggest itineraries for Silchar.
"#;

/// The model turn that accepts the persona.
pub const PERSONA_ACKNOWLEDGEMENT: &str =
    "Understood. I am Jina, the AI Concierge for Hotel Jina. I am ready to assist guests.";

/// First message of every conversation.
pub const GREETING: &str =
    "Hello! I'm Jina, your AI concierge. How can I help you plan your stay in Silchar today?";

/// Reply when the provider succeeds but returns no usable text.
pub const CLARIFICATION_REPLY: &str = "I didn't quite catch that. Could you rephrase?";

/// Builds the turns sent to the provider: the context as a priming user
/// turn, the persona acknowledgement, then the whole history by sender.
#[must_use]
pub fn build_turns(system_context: &str, history: &[Message]) -> Vec<PromptTurn> {
    let mut turns = Vec::with_capacity(history.len() + 2);
    turns.push(PromptTurn::user(system_context));
    turns.push(PromptTurn::model(PERSONA_ACKNOWLEDGEMENT));
    turns.extend(history.iter().map(|m| match m.sender {
        Sender::User => PromptTurn::user(m.text.as_str()),
        Sender::Assistant => PromptTurn::model(m.text.as_str()),
    }));
    turns
}
