use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// One knowledge-base entry: trigger keywords and the canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Topic {
    pub name: String,
    pub keywords: Vec<String>,
    pub response: String,
}

impl Topic {
    pub fn new(name: &str, keywords: &[&str], response: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            response: response.to_string(),
        }
    }

    /// Number of keywords occurring in `input_lower`. The input must already be lowercased.
    pub fn score(&self, input_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| input_lower.contains(keyword.as_str()))
            .count()
    }
}

/// Ordered, read-only set of topics. Declaration order decides ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTable {
    topics: Vec<Topic>,
}

impl TopicTable {
    /// Normalizes keywords (trim, lowercase, drop empties and repeats) and rejects duplicate names.
    pub fn new(topics: Vec<Topic>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(topics.len());

        for mut topic in topics {
            if !seen.insert(topic.name.clone()) {
                bail!("duplicate topic name '{}'", topic.name);
            }

            let before = topic.keywords.len();
            let lowered: Vec<String> = topic
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if lowered.len() != before {
                log::warn!(
                    "topic '{}': dropped {} empty keyword(s)",
                    topic.name,
                    before - lowered.len()
                );
            }

            // Keywords form a set; the first spelling keeps its place.
            let mut unique = HashSet::new();
            let non_empty = lowered.len();
            topic.keywords = lowered
                .into_iter()
                .filter(|k| unique.insert(k.clone()))
                .collect();
            if topic.keywords.len() != non_empty {
                log::warn!(
                    "topic '{}': dropped {} duplicate keyword(s)",
                    topic.name,
                    non_empty - topic.keywords.len()
                );
            }

            if topic.keywords.is_empty() {
                log::warn!("topic '{}' has no keywords and can never match, skipping", topic.name);
                continue;
            }

            normalized.push(topic);
        }

        Ok(Self { topics: normalized })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Answers for a management & technology consulting firm.
    pub fn builtin() -> Self {
        let topics = vec![
            Topic::new(
                "services",
                &["service", "offer", "provide", "help with", "what do you do", "consulting", "expertise"],
                "We offer end-to-end consulting 💼\n\
                 • Strategy & digital transformation\n\
                 • Operations and process improvement\n\
                 • Technology advisory and implementation\n\
                 • Data & analytics\n\
                 • Change management and training\n\n\
                 Which of these would you like to know more about?",
            ),
            Topic::new(
                "pricing",
                &["price", "pricing", "cost", "fee", "rate", "budget", "how much", "quote", "expensive"],
                "Our pricing depends on scope 💰\n\
                 • Fixed-price projects for well-defined deliverables\n\
                 • Monthly retainers for ongoing advisory\n\
                 • Hourly rates for short engagements\n\n\
                 Book a free discovery call and we'll prepare a tailored quote.",
            ),
            Topic::new(
                "process",
                &["process", "approach", "methodology", "how do you work", "steps", "engagement"],
                "Our engagement process 🧭\n\
                 1. Discovery call to understand your goals\n\
                 2. Assessment of your current state\n\
                 3. Proposal with scope, timeline and budget\n\
                 4. Delivery in short, reviewed iterations\n\
                 5. Handover and follow-up support",
            ),
            Topic::new(
                "timeline",
                &["timeline", "how long", "duration", "weeks", "months", "deadline", "start"],
                "Typical timelines ⏱️\n\
                 • Assessments: 2–4 weeks\n\
                 • Strategy projects: 6–12 weeks\n\
                 • Implementations: 3–6 months\n\n\
                 We can usually start within two weeks of signing.",
            ),
            Topic::new(
                "industries",
                &["industry", "industries", "sector", "clients", "healthcare", "finance", "retail", "manufacturing"],
                "We work across many sectors 🏢\n\
                 • Financial services\n\
                 • Healthcare & life sciences\n\
                 • Retail & e-commerce\n\
                 • Manufacturing & logistics\n\
                 • Public sector and non-profits",
            ),
            Topic::new(
                "about",
                &["about", "who are you", "team", "founded", "experience", "company", "history"],
                "We're an independent consulting firm founded by former Big Four advisors 👋\n\
                 Our team of senior consultants has delivered 200+ projects for clients \
                 ranging from start-ups to listed companies.",
            ),
            Topic::new(
                "careers",
                &["career", "job", "hiring", "vacancy", "position", "join", "apply", "internship"],
                "We're always looking for talent 🚀\n\
                 Open positions are listed on our Careers page, where you can apply directly. \
                 Don't see a fit? Send us an open application.",
            ),
            Topic::new(
                "contact",
                &["contact", "email", "phone", "call you", "reach", "talk to", "get in touch"],
                "You can reach us any time 📬\n\
                 • Use the contact form on this site\n\
                 • Email or call us during business hours\n\
                 We reply within one business day.",
            ),
            Topic::new(
                "location",
                &["location", "office", "address", "where are you", "hours", "open", "remote"],
                "Our office is open Monday–Friday, 9:00–18:00 📍\n\
                 We work with clients on-site and fully remote.",
            ),
            Topic::new(
                "booking",
                &["book", "schedule", "appointment", "meeting", "consultation", "discovery call", "calendar"],
                "Let's talk! 📅\n\
                 Use the \"Book a call\" button to pick a 30-minute slot for a free discovery call.",
            ),
        ];

        // The table above is static and well-formed.
        Self { topics }
    }
}

/// A topic table plus the suggested questions offered as shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    pub topics: TopicTable,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    topics: Vec<Topic>,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self {
            topics: TopicTable::builtin(),
            suggestions: vec![
                "What services do you offer?".to_string(),
                "How much does a project cost?".to_string(),
                "How long does a typical project take?".to_string(),
                "How can I book a consultation?".to_string(),
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: KnowledgeFile =
            serde_json::from_str(json).context("invalid knowledge base JSON")?;
        let topics = TopicTable::new(file.topics)?;
        let suggestions = file
            .suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self { topics, suggestions })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read knowledge base {}", path.display()))?;
        let kb = Self::from_json(&json)
            .with_context(|| format!("cannot load knowledge base {}", path.display()))?;
        log::info!(
            "knowledge base {}: {} topics, {} suggestions",
            path.display(),
            kb.topics.len(),
            kb.suggestions.len()
        );
        Ok(kb)
    }

    /// Explicit path must load; otherwise the per-user file if present; otherwise built-in.
    pub fn resolve(explicit: Option<&Path>, user_default: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = user_default.filter(|p| p.is_file()) {
            return Self::load(path);
        }
        log::info!("using built-in knowledge base");
        Ok(Self::builtin())
    }
}
