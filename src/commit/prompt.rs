//! Prompt construction for AI-generated commit messages.

use crate::error::InvalidArgument;

/// Label the backend must put in front of the title line.
pub const TITLE_LABEL: &str = "Commit title:";

/// Label the backend must put in front of the description.
pub const DESCRIPTION_LABEL: &str = "Commit description:";

/// Build the generation prompt for a patch document.
///
/// The patch is embedded verbatim. The reply format section uses
/// [`TITLE_LABEL`] and [`DESCRIPTION_LABEL`], which the response parser
/// relies on.
pub fn build_prompt(patch_content: &str) -> Result<String, InvalidArgument> {
    if patch_content.trim().is_empty() {
        return Err(InvalidArgument::EmptyPatch);
    }

    Ok(format!(
        r#"Please generate a concise Git commit message based on the following changes:

Changes:
{patch_content}

The output should include:
- A commit title:
   - Written in imperative mood
   - Clear and concise
   - Ideally 50 characters or less

- A commit description:
   - Written in imperative mood
   - Provides a clear summary of the changes
   - Includes any additional context that might be helpful

Format your response as follows:
{TITLE_LABEL} [Your title here]
{DESCRIPTION_LABEL} [Your description here]"#
    ))
}
