//! Everything the candidate reads.

use talentscout_questions::TechnicalQuestion;

use crate::profile::{Field, FieldValue};
use crate::ValidationError;

pub const GREETING: &str = "Welcome to TalentScout, your AI-powered hiring assistant!

I'm here to conduct your initial screening interview. It takes about 5-10 minutes.

I'll ask a few questions about your background and then some technical questions \
based on the technologies you work with. Type exit, quit, bye or stop at any time \
to end the conversation.

Say hello whenever you're ready to begin.";

pub const GENERATING: &str = "Preparing your technical questions...";

pub const QUESTIONS_INTRO: &str = "Let's begin your technical questions.";

pub const ANSWER_THANKS: &str = "Thank you for that answer!";

pub const EXIT_MESSAGE: &str = "Thank you for your time! The recruitment team will review \
your information and follow up with you soon. Goodbye!";

pub const COMPLETION_MESSAGE: &str = "Thank you for answering all the questions!

Your screening interview is complete. The recruitment team will review your responses \
and follow up with you soon at the email and phone number you provided.

Thank you for your time!";

/// Prompt for a field, addressed by first name once it is known
pub fn field_prompt(field: Field, first_name: Option<&str>) -> String {
    let question = match field {
        Field::FullName => return "What's your full name?".to_string(),
        Field::Email => "what's your email address?",
        Field::Phone => "what's your phone number?",
        Field::YearsExperience => "how many years of professional experience do you have?",
        Field::DesiredPosition => "what position are you applying for?",
        Field::Location => "what's your current location?",
        Field::TechStack => {
            "what technologies are you proficient in? \
             (Please provide a comma-separated list, e.g., Python, React, PostgreSQL)"
        }
    };

    match first_name {
        Some(name) => format!("{}, {}", name, question),
        None => capitalize(question),
    }
}

pub fn rejection(error: &ValidationError, field: Field, first_name: Option<&str>) -> String {
    format!(
        "{}. Please try again (e.g., {}).\n\n{}",
        error,
        field.example(),
        field_prompt(field, first_name)
    )
}

pub fn acknowledgement(field: Field, value: &FieldValue) -> String {
    let value = value.to_input();
    match field {
        Field::FullName => format!(
            "Nice to meet you, {}!",
            value.split_whitespace().next().unwrap_or(&value)
        ),
        Field::Email => "Great! Email saved.".to_string(),
        Field::Phone => "Perfect! Phone number saved.".to_string(),
        Field::YearsExperience => format!("Excellent! {} years of experience noted.", value),
        Field::DesiredPosition => format!("Interesting! {} is a great role.", value),
        Field::Location => format!("Got it! You're based in {}.", value),
        Field::TechStack => format!("Great! I've noted your tech stack: {}.", value),
    }
}

/// "Question 2/3 (SQL): ..." or, for the fallback, "Question 1/1: ..."
pub fn question(number: usize, total: usize, question: &TechnicalQuestion) -> String {
    match question.technology() {
        Some(tech) => format!(
            "Question {}/{} ({}): {}",
            number,
            total,
            tech,
            question.text()
        ),
        None => format!("Question {}/{}: {}", number, total, question.text()),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
