// Response translation (Gemini → edit result)
// Author: kelexine (https://github.com/kelexine)

use crate::error::{EditError, Result};
use crate::models::edit::EditedImageResult;
use crate::models::gemini::{GenerateContentResponse, Part};
use crate::vision::data_url;
use tracing::{debug, warn};

/// Finish reason for a normal, complete generation.
const FINISH_REASON_STOP: &str = "STOP";

/// Normalize a Gemini response into an [`EditedImageResult`].
///
/// A blocked prompt is a successful result carrying an explanation. Only the
/// first candidate is read; within it the last image part and the last text
/// part win.
pub fn normalize_response(response: GenerateContentResponse) -> Result<EditedImageResult> {
    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Usage: prompt={:?}, candidates={:?}, total={:?}",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }

    // 1. Prompt refused by policy
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
        .filter(|reason| !reason.is_empty())
    {
        warn!("Edit request blocked: {}", reason);
        return Ok(EditedImageResult::blocked(reason));
    }

    // 2. First candidate
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        EditError::Protocol(
            "The API did not return any candidates, and no block reason was provided."
                .to_string(),
        )
    })?;

    debug!("Response finish_reason: {:?}", candidate.finish_reason);

    // 3. Collect image and text parts
    let mut image_url = None;
    let mut text = None;
    let mut image_parts = 0usize;
    let mut text_parts = 0usize;

    for part in candidate.content.map(|content| content.parts).unwrap_or_default() {
        match part {
            Part::InlineData { inline_data } => {
                image_parts += 1;
                image_url = Some(data_url(&inline_data.mime_type, &inline_data.data));
            }
            Part::Text { text: part_text } if !part_text.is_empty() => {
                text_parts += 1;
                text = Some(part_text);
            }
            _ => {}
        }
    }

    if image_parts > 1 || text_parts > 1 {
        warn!(
            "Candidate had {} image parts and {} text parts; keeping the last of each",
            image_parts, text_parts
        );
    }

    // 4. Explain an early stop when no image came back
    if image_url.is_none() {
        if let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|reason| !reason.is_empty() && *reason != FINISH_REASON_STOP)
        {
            let stopped = format!("Image generation stopped due to: {}.", reason);
            text = Some(match text {
                Some(existing) => format!("{}\n\n{}", stopped, existing),
                None => stopped,
            });
        }
    }

    if image_url.is_none() && text.is_none() {
        return Err(EditError::Protocol(
            "The API returned an empty response. Your request may have been filtered."
                .to_string(),
        ));
    }

    Ok(EditedImageResult::new(image_url, text))
}
