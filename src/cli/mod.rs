// CLI module for roomedit
// Author: kelexine (https://github.com/kelexine)

use crate::editor::ImageEditor;
use crate::error::Result;
use crate::models::edit::EditedImageResult;
use crate::vision::ImageFormat;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// roomedit - Edit hotel room photos with natural-language prompts
#[derive(Parser, Debug)]
#[command(name = "roomedit", version, about, long_about = None)]
pub struct Args {
    /// Gemini model to use instead of the configured one
    #[arg(long, global = true, env = "ROOMEDIT_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Edit a single photo and exit
    Edit(EditArgs),
}

#[derive(ClapArgs, Debug)]
pub struct EditArgs {
    /// Photo to edit (PNG, JPEG or WEBP)
    #[arg(short, long)]
    pub image: PathBuf,

    /// Description of the change, e.g. "replace the carpet with oak flooring"
    #[arg(short, long)]
    pub prompt: String,

    /// Where to write the edited photo [default: edited.<ext>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the result as JSON instead of writing files
    #[arg(long)]
    pub json: bool,
}

/// What a one-shot edit produced.
#[derive(Debug)]
pub struct EditSummary {
    pub result: EditedImageResult,
    /// Path the edited photo was written to, if any.
    pub saved_to: Option<PathBuf>,
}

/// Run the `edit` command: one edit, then print text and save the photo.
pub async fn run_edit(editor: &ImageEditor, args: &EditArgs) -> Result<EditSummary> {
    let result = editor.edit_file(&args.image, args.prompt.clone()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(EditSummary {
            result,
            saved_to: None,
        });
    }

    if let Some(text) = &result.text {
        println!("{}", text);
    }

    let saved_to = save_image(&result, args.output.as_deref())?;
    if let Some(path) = &saved_to {
        println!("Edited photo saved to {}", path.display());
    }

    Ok(EditSummary { result, saved_to })
}

/// Write the edited photo, if any. Without an explicit path the extension
/// follows the returned MIME type.
pub fn save_image(result: &EditedImageResult, output: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(image) = result.image()? else {
        return Ok(None);
    };

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let ext = ImageFormat::from_mime_type(&image.mime_type)
                .map(|format| format.extension())
                .unwrap_or("png");
            PathBuf::from(format!("edited.{}", ext))
        }
    };

    std::fs::write(&path, image.decode()?)?;
    Ok(Some(path))
}
