//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Drives the full flow: pick a recording, analyze, preview, export, repeat.

use crate::adapters::media;
use crate::adapters::ui::progress;
use crate::domain::{AnalysisSession, DomainError, DriveFolder, ExtractedLog};
use crate::ports::InputPort;
use crate::usecases::{AnalysisService, ExportService};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, Select, Text};
use std::sync::Arc;

const MENU_ANALYZE: &str = "Analyze a screen recording";
const MENU_QUIT: &str = "Quit";

const EXPORT_TXT: &str = "Download log (.txt)";
const EXPORT_DRIVE: &str = "Save to Google Drive";
const EXPORT_DONE: &str = "Done";

const ROOT_FOLDER: &str = "My Drive (root)";

/// Characters of extracted content shown in the preview.
const PREVIEW_CHARS: usize = 1200;

/// Applies the blue/green accent theme for all subsequent inquire prompts.
/// Call once at startup.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default_colored();
    cfg.prompt_prefix = Styled::new("»").with_fg(Color::LightBlue);
    cfg.answered_prompt_prefix = Styled::new("✔").with_fg(Color::LightGreen);
    cfg.highlighted_option_prefix = Styled::new("›").with_fg(Color::LightBlue);
    cfg.selected_option = Some(StyleSheet::new().with_fg(Color::LightGreen));
    inquire::set_global_render_config(cfg);
}

fn prompt_err(e: inquire::InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

/// TUI adapter. Inquire prompts around the analysis and export services.
pub struct TuiInputPort {
    analysis: Arc<AnalysisService>,
    export: Arc<ExportService>,
    size_warn_mb: u64,
}

impl TuiInputPort {
    pub fn new(
        analysis: Arc<AnalysisService>,
        export: Arc<ExportService>,
        size_warn_mb: u64,
    ) -> Self {
        Self {
            analysis,
            export,
            size_warn_mb,
        }
    }

    /// One full run: select video -> analyze -> preview -> export menu.
    /// Analysis failures are shown to the user; only prompt errors propagate.
    async fn process_one(&self) -> Result<(), DomainError> {
        let path = Text::new("Path to screen recording:")
            .with_help_message("MP4, MOV (max 1 min recommended)")
            .prompt()
            .map_err(prompt_err)?;

        let clip = match media::load_clip(path.trim()).await {
            Ok(clip) => clip,
            Err(e) => {
                eprintln!("✗ {}", e);
                return Ok(());
            }
        };

        if clip.exceeds_mb(self.size_warn_mb) {
            let proceed = Confirm::new(&format!(
                "This video is quite large ({:.2} MB). Processing might be slow. Continue?",
                clip.size_mb()
            ))
            .with_default(true)
            .prompt()
            .map_err(prompt_err)?;
            if !proceed {
                return Ok(());
            }
        }

        let mut session = AnalysisSession::new();
        session.select_video(clip);

        let spinner = progress::analysis_spinner("Gemini is thinking...");
        let outcome = self.analysis.run(&mut session).await;
        spinner.finish_and_clear();

        if outcome.is_err() {
            let message = session.error_message().unwrap_or("unexpected failure");
            eprintln!("✗ Error encountered: {}", message);
            return Ok(());
        }

        let Some(log) = session.result() else {
            return Ok(());
        };

        Self::print_preview(log);
        self.export_menu(log).await
    }

    fn print_preview(log: &ExtractedLog) {
        println!("\n── Content Preview ── {} ──\n", log.date_range());
        if log.content.len() > PREVIEW_CHARS {
            let cut = log
                .content
                .char_indices()
                .take_while(|(i, _)| *i < PREVIEW_CHARS)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            println!("{}…", &log.content[..cut]);
        } else {
            println!("{}", log.content);
        }
        println!();
    }

    /// Export menu: repeat until the user is done with this result.
    async fn export_menu(&self, log: &ExtractedLog) -> Result<(), DomainError> {
        loop {
            let mut options = vec![EXPORT_TXT.to_string()];
            if self.export.drive_available() {
                options.push(EXPORT_DRIVE.to_string());
            }
            options.push(EXPORT_DONE.to_string());

            let choice = Select::new("Export:", options).prompt().map_err(prompt_err)?;

            match choice.as_str() {
                EXPORT_TXT => match self.export.save_txt(log).await {
                    Ok(path) => println!("✔ Saved to {}", path.display()),
                    Err(e) => eprintln!("✗ {}", e),
                },
                EXPORT_DRIVE => {
                    if let Err(e) = self.drive_flow(log).await {
                        // Prompt cancellation propagates; API errors were shown
                        if matches!(e, DomainError::Input(_)) {
                            return Err(e);
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Folder search + selection, then upload.
    async fn drive_flow(&self, log: &ExtractedLog) -> Result<(), DomainError> {
        let term = Text::new("Search folders (leave empty to list all):")
            .prompt()
            .map_err(prompt_err)?;
        let search = match term.trim() {
            "" => None,
            t => Some(t),
        };

        let spinner = progress::analysis_spinner("Loading folders...");
        let folders = self.export.list_drive_folders(search).await;
        spinner.finish_and_clear();

        let folders = match folders {
            Ok(folders) => folders,
            Err(e) => {
                eprintln!("✗ {}", e);
                return Err(e);
            }
        };

        let folder_id = Self::pick_folder(&folders)?;

        let spinner = progress::analysis_spinner("Uploading to Google Drive...");
        let uploaded = self.export.save_to_drive(log, folder_id.as_deref()).await;
        spinner.finish_and_clear();

        match uploaded {
            Ok(file_id) => {
                println!("✔ Saved to Google Drive as a Doc (file id {})", file_id);
                Ok(())
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                Err(e)
            }
        }
    }

    /// Select a destination folder; `None` means the Drive root.
    fn pick_folder(folders: &[DriveFolder]) -> Result<Option<String>, DomainError> {
        let mut options: Vec<String> = folders
            .iter()
            .map(|f| format!("{} ({})", f.name, f.id))
            .collect();
        options.push(ROOT_FOLDER.to_string());

        let selected = Select::new("Select target folder", options)
            .prompt()
            .map_err(prompt_err)?;

        if selected == ROOT_FOLDER {
            return Ok(None);
        }

        // Map selected display string back to the folder id (match full option string)
        Ok(folders
            .iter()
            .find(|f| selected == format!("{} ({})", f.name, f.id))
            .map(|f| f.id.clone()))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = Select::new(
                "What would you like to do?",
                vec![MENU_ANALYZE.to_string(), MENU_QUIT.to_string()],
            )
            .prompt()
            .map_err(prompt_err)?;

            if choice == MENU_QUIT {
                return Ok(());
            }

            self.process_one().await?;
        }
    }
}
