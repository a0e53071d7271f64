//! Prompt templates for roadmap and ancillary generation
//!
//! The roadmap system instruction describes the exact JSON shape the
//! validator enforces; the two must stay in lockstep.

/// System instruction for roadmap generation
///
/// The key names `roadMap`, `course_name`, `roadmap`, `unit_number`,
/// `unit_title` and `topics` are the wire contract the validator checks.
pub const ROADMAP_SYSTEM_INSTRUCTION: &str = r#"Generate a detailed roadmap in JSON format based on the following uploaded PDF file. The JSON structure should strictly follow the format below, ensuring that the keys remain unchanged and the structure is consistent. The roadmap should include course details and a list of units, each with a unit number, unit title, and a list of topics. Here is the expected JSON format:

{
  "roadMap": {
    "course_name": "[Course Name]",
    "roadmap": [
      {
        "topics": [
          "[Topic 1]",
          "[Topic 2]",
          "[Topic 3]"
        ],
        "unit_number": "[Unit Number]",
        "unit_title": "[Unit Title]"
      }
    ]
  }
}

Ensure that the keys 'roadMap', 'course_name', 'roadmap', 'topics', 'unit_number', and 'unit_title' are used exactly as shown. The content within the square brackets should be replaced with relevant information extracted from the PDF file."#;

/// User turn accompanying the uploaded syllabus document
pub const ROADMAP_USER_MESSAGE: &str =
    "Generate a detailed roadmap in JSON format based on the uploaded document.";

/// Build the prompt for syllabus-section content generation
pub fn syllabus_content(objectives: &str, title: &str) -> String {
    format!(
        "You are an AI educator tasked with creating a comprehensive and engaging \
         educational syllabus section for the topic \"{title}\".\n\n\
         Instructions:\n\
         1. Begin with an introduction providing context and relevance.\n\
         2. Break the content into logical sections with clear subheadings.\n\
         3. Ensure the content flows naturally, building on concepts progressively.\n\
         4. Conclude with a summary of key takeaways.\n\
         5. Address all of the following learning objectives and make explicit how \
         each section contributes to them.\n\n\
         Learning objectives:\n{objectives}\n"
    )
}

/// Build the prompt for explaining a passage of text
pub fn explanation(text: &str) -> String {
    format!("Explain this: {text}")
}

/// Build the prompt for translating text to a target language
pub fn translation(text: &str, language: &str) -> String {
    format!(
        "Translate the following text to {language}: {text}. \
         Provide only the translated text without any additional explanations."
    )
}
