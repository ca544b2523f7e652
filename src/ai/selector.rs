use std::sync::OnceLock;

use regex::Regex;

use crate::ai::knowledge::{Topic, TopicTable};
use crate::config::Config;

const THANKS_MARKERS: [&str; 2] = ["thank", "thx"];

fn greeting_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(hi|hello|hey|greetings|howdy|good\s+(morning|afternoon|evening))\b")
            .expect("greeting pattern is a valid regex")
    })
}

/// Input must already be lowercased.
fn is_greeting(input_lower: &str) -> bool {
    greeting_pattern().is_match(input_lower)
}

fn is_thanks(input_lower: &str) -> bool {
    THANKS_MARKERS.iter().any(|m| input_lower.contains(m))
}

/// Fixed replies that bypass the topic table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replies {
    pub greeting: String,
    pub thanks: String,
    /// `{input}`, `{name}`, `{email}` and `{phone}` are substituted.
    pub default_template: String,
    pub assistant_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl Replies {
    pub fn from_config(config: &Config) -> Self {
        Self {
            greeting: format!(
                "Hello! 👋 I'm {}, the virtual assistant.\n\
                 Ask me about our services, pricing, process or how to book a call.",
                config.assistant_name
            ),
            thanks: "You're welcome! 😊 Is there anything else I can help you with?".to_string(),
            default_template: "I'm not sure I have an answer to \"{input}\" yet 🤔\n\n\
                               Try asking about our services, pricing, process or timelines, \
                               or reach our team directly:\n\
                               📧 {email}\n\
                               📞 {phone}"
                .to_string(),
            assistant_name: config.assistant_name.clone(),
            contact_email: config.contact_email.clone(),
            contact_phone: config.contact_phone.clone(),
        }
    }

    /// Renders the fallback message for `input` as typed.
    pub fn default_for(&self, input: &str) -> String {
        // User text goes in last so placeholders inside it stay literal.
        self.default_template
            .replace("{name}", &self.assistant_name)
            .replace("{email}", &self.contact_email)
            .replace("{phone}", &self.contact_phone)
            .replace("{input}", input)
    }
}

/// Highest-scoring topic for an already lowercased input.
///
/// A later topic replaces the current best only with a strictly greater
/// score, so among equal scores the first declared topic wins. Returns
/// `None` when nothing scores above zero.
pub fn best_match<'a>(input_lower: &str, table: &'a TopicTable) -> Option<(&'a Topic, usize)> {
    let mut best: Option<(&Topic, usize)> = None;
    let mut highest = 0;

    for topic in table.iter() {
        let score = topic.score(input_lower);
        if score > highest {
            highest = score;
            best = Some((topic, score));
        }
    }

    best
}

/// Picks the reply for `input`: greeting, then thanks, then the best topic,
/// then the default template.
pub fn select_response(input: &str, table: &TopicTable, replies: &Replies) -> String {
    select_with_match(input, table, replies).1
}

/// The reply plus the winning topic, when the table decided it.
fn select_with_match<'a>(
    input: &str,
    table: &'a TopicTable,
    replies: &Replies,
) -> (Option<(&'a Topic, usize)>, String) {
    let input_lower = input.to_lowercase();

    // Greeting first, then thanks, before the table is consulted
    if is_greeting(&input_lower) {
        return (None, replies.greeting.clone());
    }

    if is_thanks(&input_lower) {
        return (None, replies.thanks.clone());
    }

    match best_match(&input_lower, table) {
        Some((topic, score)) => (Some((topic, score)), topic.response.clone()),
        None => (None, replies.default_for(input)),
    }
}

/// Bundles an immutable table with its replies.
#[derive(Debug, Clone)]
pub struct Responder {
    table: TopicTable,
    replies: Replies,
}

impl Responder {
    pub fn new(table: TopicTable, replies: Replies) -> Self {
        Self { table, replies }
    }

    pub fn respond(&self, input: &str) -> String {
        let (matched, reply) = select_with_match(input, &self.table, &self.replies);
        match matched {
            Some((topic, score)) => log::debug!("best topic '{}' (score {})", topic.name, score),
            None => log::debug!("answered without a topic"),
        }
        reply
    }

    pub fn replies(&self) -> &Replies {
        &self.replies
    }

    pub fn table(&self) -> &TopicTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn replies() -> Replies {
        let vars: HashMap<&str, &str> = [
            ("CONCIERGE_NAME", "Ava"),
            ("CONCIERGE_CONTACT_EMAIL", "team@acme.test"),
            ("CONCIERGE_CONTACT_PHONE", "555-0100"),
        ]
        .into_iter()
        .collect();
        Replies::from_config(&Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())))
    }

    fn table() -> TopicTable {
        TopicTable::new(vec![
            Topic::new("pricing", &["pricing", "cost"], "PRICING"),
            Topic::new("services", &["service", "offer"], "SERVICES"),
            Topic::new("plans", &["plan", "tier", "cost"], "PLANS"),
        ])
        .unwrap()
    }

    #[test]
    fn greetings_win_regardless_of_table() {
        let r = replies();
        for input in ["hello", "Hi there", "  hey, what does it cost?", "Good morning!", "HOWDY"] {
            assert_eq!(select_response(input, &table(), &r), r.greeting, "input: {input}");
            assert_eq!(select_response(input, &TopicTable::default(), &r), r.greeting);
        }
    }

    #[test]
    fn greeting_needs_a_word_boundary() {
        let r = replies();
        assert_ne!(select_response("history of your company", &table(), &r), r.greeting);
        assert_ne!(select_response("hiring?", &table(), &r), r.greeting);
        assert_ne!(select_response("well hello", &table(), &r), r.greeting);
    }

    #[test]
    fn thanks_beats_topic_keywords() {
        let r = replies();
        for input in ["thanks!", "thank you very much", "Thanks for the pricing info", "thx"] {
            assert_eq!(select_response(input, &table(), &r), r.thanks, "input: {input}");
        }
    }

    #[test]
    fn greeting_beats_thanks() {
        let r = replies();
        assert_eq!(select_response("hi, thanks", &table(), &r), r.greeting);
        assert_eq!(select_response("hi, thanks", &TopicTable::default(), &r), r.greeting);
        assert_eq!(select_response("Hello, thank you for the pricing", &table(), &r), r.greeting);
    }

    #[test]
    fn responder_agrees_with_select_response() {
        let r = replies();
        let responder = Responder::new(table(), r.clone());
        for input in ["hi, thanks", "thx", "cost?", "which plan tier has the lowest cost", "mars"] {
            assert_eq!(responder.respond(input), select_response(input, &table(), &r));
        }
        let (matched, reply) = select_with_match("plan tier cost", responder.table(), &r);
        assert_eq!(matched.map(|(t, s)| (t.name.as_str(), s)), Some(("plans", 3)));
        assert_eq!(reply, "PLANS");
        assert!(select_with_match("thanks, what's the cost", responder.table(), &r).0.is_none());
    }

    #[test]
    fn single_keyword_selects_topic() {
        assert_eq!(select_response("what is your pricing", &table(), &replies()), "PRICING");
        assert_eq!(select_response("do you offer audits?", &table(), &replies()), "SERVICES");
    }

    #[test]
    fn first_declared_wins_on_tie() {
        // "cost" scores 1 for both "pricing" and "plans".
        assert_eq!(select_response("cost?", &table(), &replies()), "PRICING");
    }

    #[test]
    fn higher_score_beats_declaration_order() {
        // pricing: cost = 1; plans: plan, tier, cost = 3
        assert_eq!(
            select_response("which plan tier has the lowest cost", &table(), &replies()),
            "PLANS"
        );
    }

    #[test]
    fn case_insensitive() {
        let r = replies();
        for input in ["PRICING", "pricing", "PrIcInG"] {
            assert_eq!(select_response(input, &table(), &r), "PRICING");
        }
    }

    #[test]
    fn default_embeds_original_input() {
        let r = replies();
        let out = select_response("Do You Ship To MARS?", &table(), &r);
        assert!(out.contains("\"Do You Ship To MARS?\""));
        assert!(out.contains("team@acme.test"));
        assert!(out.contains("555-0100"));
        assert_eq!(out, r.default_for("Do You Ship To MARS?"));
    }

    #[test]
    fn empty_input_gets_default() {
        let r = replies();
        assert_eq!(select_response("", &table(), &r), r.default_for(""));
    }

    #[test]
    fn placeholders_in_input_stay_literal() {
        let out = replies().default_for("what is {email}?");
        assert!(out.contains("\"what is {email}?\""));
    }

    #[test]
    fn idempotent() {
        let r = replies();
        let t = table();
        for input in ["cost?", "hello", "nothing here", ""] {
            assert_eq!(select_response(input, &t, &r), select_response(input, &t, &r));
        }
    }

    #[test]
    fn best_match_reports_score() {
        let t = table();
        let (topic, score) = best_match("plan tier cost", &t).unwrap();
        assert_eq!(topic.name, "plans");
        assert_eq!(score, 3);
        assert!(best_match("nothing", &t).is_none());
    }

    #[test]
    fn builtin_table_answers_common_questions() {
        let responder = Responder::new(TopicTable::builtin(), replies());
        let pricing = TopicTable::builtin().get("pricing").unwrap().response.clone();
        assert_eq!(responder.respond("How much does a project cost?"), pricing);
        let booking = TopicTable::builtin().get("booking").unwrap().response.clone();
        assert_eq!(responder.respond("I'd like to schedule a discovery call"), booking);
    }
}
