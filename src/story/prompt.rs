use crate::catalog;

use super::StoryRequest;

const CONTINUATION_LEAD: &str =
    "The following is the beginning of a story. Continue it in a natural and engaging way:";
const CONTINUATION_TAIL: &str = "[Continue the story from here...]";

const QUALITY_REQUIREMENTS: &[&str] = &[
    "A clear beginning, middle, and end",
    "Appropriate tone and length",
    "Well-developed characters",
    "Vivid descriptions and emotional depth",
];

/// Build the user prompt for the completion API.
///
/// Unknown length, style or language names degrade to the catalog defaults,
/// so this never fails.
pub fn build_prompt(request: &StoryRequest) -> String {
    let mut directives = vec![format!("Write the story in {}.", request.language)];
    if let Some(mood) = &request.mood {
        directives.push(format!("Make the tone of the story {}.", mood.to_lowercase()));
    }
    directives.push(format!(
        "Write in a {} style - {}",
        request.prose_style.to_lowercase(),
        catalog::style_description(&request.prose_style)
    ));
    let directives = directives.join("\n");

    let prompt = if request.is_continuation {
        format!(
            "{directives}\n\n{CONTINUATION_LEAD}\n\n{}\n\n{CONTINUATION_TAIL}\n",
            request.plot
        )
    } else {
        let requirements: String = QUALITY_REQUIREMENTS
            .iter()
            .map(|line| format!("- {line}\n"))
            .collect();

        format!(
            "Create an engaging {} story that is {} based on this idea:\n\n{}\n\n{directives}\n\nPlease create a compelling story with:\n{requirements}",
            request.genre.as_deref().unwrap_or_default(),
            catalog::length_descriptor(request.length.as_deref().unwrap_or_default()),
            request.plot
        )
    };

    prompt.trim().to_string()
}
