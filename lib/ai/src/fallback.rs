//! Keyword fallback rules ("Demo Mode").
//!
//! Used when no credential is configured and whenever the remote call
//! fails. Matching is case-insensitive plain substring search; rules are
//! tried in order and the first hit wins.

/// One keyword rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lower-case substrings that trigger the rule.
    pub keywords: &'static [&'static str],
    /// Canned reply.
    pub reply: &'static str,
}

impl KeywordRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Room rates.
pub const ROOM_RATES: KeywordRule = KeywordRule {
    keywords: &["room", "price", "cost", "stay"],
    reply: "Since I'm in Demo Mode, I can tell you our rates:\n\n• Executive Room: ₹3,500\n• Luxury Suite: ₹5,200\n• Classic Double: ₹2,800\n\nAll rooms include breakfast!",
};

/// Restaurant and bar hours.
pub const DINING: KeywordRule = KeywordRule {
    keywords: &["food", "restaurant", "eat", "dining"],
    reply: "Our restaurant serves authentic Assamese and multi-cuisine dishes from 7 AM to 10:30 PM. We also have a lovely Bar & Lounge open until 10 PM. (Demo Mode)",
};

/// Address.
pub const LOCATION: KeywordRule = KeywordRule {
    keywords: &["location", "where", "address"],
    reply: "We are located at Malugram, Silchar, Assam 788002. It's a prime location near the city center! (Demo Mode)",
};

/// Amenities.
pub const AMENITIES: KeywordRule = KeywordRule {
    keywords: &["wifi", "parking", "gym"],
    reply: "Yes! We offer complimentary High-Speed WiFi and Free Valet Parking for all guests. (Demo Mode)",
};

/// Reply when no rule matches.
pub const DEFAULT_REPLY: &str = "Hello! I’m Jina. I’m having a tiny technical hiccup right now.\n\nI think my developer, Monoswee Nath, is either updating something awesome for you… or he’s off somewhere eating, sleeping, and living his best life.\n\nBut don’t worry—I can still answer questions about our Rooms, Location, and Dining!";

/// An ordered rule list plus its default reply.
#[derive(Debug, Clone)]
pub struct KeywordRuleSet {
    rules: Vec<KeywordRule>,
    default_reply: &'static str,
}

impl KeywordRuleSet {
    /// Creates a rule set. Order is evaluation order.
    #[must_use]
    pub fn new(rules: Vec<KeywordRule>, default_reply: &'static str) -> Self {
        Self {
            rules,
            default_reply,
        }
    }

    /// Hotel Jina's rules: rates, dining, location, amenities.
    #[must_use]
    pub fn hotel_jina() -> Self {
        Self::new(vec![ROOM_RATES, DINING, LOCATION, AMENITIES], DEFAULT_REPLY)
    }

    /// Returns the reply for a guest message.
    #[must_use]
    pub fn reply_for(&self, text: &str) -> &'static str {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.default_reply, |rule| rule.reply)
    }
}

impl Default for KeywordRuleSet {
    fn default() -> Self {
        Self::hotel_jina()
    }
}
