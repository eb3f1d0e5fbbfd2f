/// Prompt templates for question generation
pub struct QuestionPrompts;

impl QuestionPrompts {
    /// Build the generation request for a declared tech stack.
    ///
    /// The position is context only. Every technology the model may mention
    /// comes from `tech_stack`.
    pub fn build_question_prompt(tech_stack: &[String], position: &str) -> String {
        let count = tech_stack.len();
        let stack_list = tech_stack.join(", ");

        format!(
            r#"You are a technical interviewer conducting an initial candidate screening.

## Declared Tech Stack
{stack_list}

## Position (context only)
{position}

---

## STRICT RULES (NON-NEGOTIABLE)

1. Write EXACTLY {count} question{plural}: one question per technology, in the order the technologies are listed above.
2. Each question must be about its technology ONLY. Do NOT introduce any technology, tool, library, or framework that is not listed verbatim in the declared tech stack.
3. Interpret every technology narrowly. Do NOT assume related domains, tools, or libraries.
4. Each question is a single, practical, screening-level question. No multi-part or compound questions.
5. The position is context only. It is NOT a source of additional technologies.
6. Do NOT evaluate, judge, explain, or add any text outside the question list.

## OUTPUT FORMAT (MANDATORY)

{format}

Output ONLY the numbered questions above, with the question text on the line after each header. Nothing else."#,
            stack_list = stack_list,
            position = display_position(position),
            count = count,
            plural = if count == 1 { "" } else { "s" },
            format = Self::output_grammar(tech_stack),
        )
    }

    /// The exact header/body layout the parser expects
    fn output_grammar(tech_stack: &[String]) -> String {
        tech_stack
            .iter()
            .enumerate()
            .map(|(i, tech)| format!("Question {} ({}):\n<question text>", i + 1, tech))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn display_position(position: &str) -> &str {
    let position = position.trim();
    if position.is_empty() {
        "Not specified"
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_lists_one_header_per_technology_in_order() {
        let prompt =
            QuestionPrompts::build_question_prompt(&stack(&["Python", "SQL", "Docker"]), "Data Engineer");

        let p1 = prompt.find("Question 1 (Python):").unwrap();
        let p2 = prompt.find("Question 2 (SQL):").unwrap();
        let p3 = prompt.find("Question 3 (Docker):").unwrap();
        assert!(p1 < p2 && p2 < p3);
        assert!(!prompt.contains("Question 4"));
        assert!(prompt.contains("EXACTLY 3 questions"));
    }

    #[test]
    fn test_prompt_forbids_undeclared_technologies() {
        let prompt = QuestionPrompts::build_question_prompt(&stack(&["Rust"]), "Backend Engineer");
        assert!(prompt.contains("not listed verbatim"));
        assert!(prompt.contains("EXACTLY 1 question:"));
        assert!(prompt.contains("Output ONLY the numbered questions"));
    }

    #[test]
    fn test_position_is_context_only() {
        let prompt =
            QuestionPrompts::build_question_prompt(&stack(&["Python"]), "Kubernetes Platform Lead");
        assert!(prompt.contains("## Position (context only)\nKubernetes Platform Lead"));
        assert!(!prompt.contains("(Kubernetes"));
    }

    #[test]
    fn test_blank_position() {
        let prompt = QuestionPrompts::build_question_prompt(&stack(&["Go"]), "   ");
        assert!(prompt.contains("Not specified"));
    }
}
