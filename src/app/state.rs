use crate::app::analysis_worker::{start_analysis_worker, AnalysisRequest, AnalysisResult};
use crate::data::config::Config;
use crate::data::deck::{CardField, CardImage, Deck, DeckEdit};
use crate::data::theme_loader::ThemeLoader;
use crate::palette::theme_keywords::theme_keyword;
use crate::palette::color::contrast_color;
use crate::palette::{Color, ColorError};
use crate::render::image_preview::{render_preview_cells, PreviewCells};
use crate::render::preview_cache::{PreviewCache, PreviewKey};
use crate::ui::theme::{Theme, ThemeName};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    ImagePath,
    ThemeWord,
    MoodWord,
    Field(CardField),
    Color(usize),
}

impl InputTarget {
    pub fn label(self) -> String {
        match self {
            InputTarget::ImagePath => "Image path".to_string(),
            InputTarget::ThemeWord => "Theme".to_string(),
            InputTarget::MoodWord => "Mood".to_string(),
            InputTarget::Field(f) => f.label().to_string(),
            InputTarget::Color(i) => format!("Color {}", i + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Prompt(InputTarget),
    FullScreen,
    SettingsModal,
    HelpModal,
}

#[derive(Debug, Default)]
pub struct PromptInput {
    pub buf: String,
}

#[derive(Debug)]
struct PreviewRenderRequest {
    key: PreviewKey,
    bytes: Arc<Vec<u8>>,
}

#[derive(Debug)]
struct PreviewRenderResult {
    key: PreviewKey,
    cells: Option<PreviewCells>,
}

pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);
const TOAST_TTL: Duration = Duration::from_millis(1800);

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub theme: Theme,

    pub deck: Deck,

    // Console inputs.
    pub uploaded_image: Option<CardImage>,
    pub theme_word: String,
    pub mood_word: String,
    pub show_console: bool,

    pub overlay: Overlay,
    pub prompt: PromptInput,
    pub settings_selected: usize,

    pub preview_cache: RefCell<PreviewCache>,
    preview_render_tx: Sender<PreviewRenderRequest>,
    preview_render_rx: Receiver<PreviewRenderResult>,
    preview_render_inflight: RefCell<HashSet<PreviewKey>>,

    analysis_tx: Sender<AnalysisRequest>,
    analysis_rx: Receiver<AnalysisResult>,
    analysis_generation: HashMap<String, u64>,
    analysis_inflight: HashSet<String>,

    pub toast: Option<(String, Instant)>,
    pub last_mouse_click: Option<(Instant, usize)>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        let (preview_render_tx, preview_req_rx) = mpsc::channel::<PreviewRenderRequest>();
        let (preview_res_tx, preview_render_rx) = mpsc::channel::<PreviewRenderResult>();

        std::thread::spawn(move || {
            while let Ok(req) = preview_req_rx.recv() {
                let cells = render_preview_cells(&req.bytes, req.key.width, req.key.height);
                if preview_res_tx.send(PreviewRenderResult { key: req.key, cells }).is_err() {
                    break;
                }
            }
        });

        let (analysis_tx, analysis_rx) = start_analysis_worker();

        let deck = Deck::default();
        let uploaded_image = deck.selected().and_then(|c| c.image.clone());

        Self {
            theme_word: config.default_theme_word.clone(),
            mood_word: config.default_mood.clone(),
            show_console: config.show_console,
            config,
            theme,
            deck,
            uploaded_image,
            overlay: Overlay::None,
            prompt: PromptInput::default(),
            settings_selected: 0,
            preview_cache: RefCell::new(PreviewCache::new(16)),
            preview_render_tx,
            preview_render_rx,
            preview_render_inflight: RefCell::new(HashSet::new()),
            analysis_tx,
            analysis_rx,
            analysis_generation: HashMap::new(),
            analysis_inflight: HashSet::new(),
            toast: None,
            last_mouse_click: None,
            should_quit: false,
        }
    }

    pub fn set_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now()));
    }

    /// Replaces the deck with the edited copy. A changed selection pulls the
    /// newly selected card's image into the console.
    pub fn edit_deck(&mut self, edit: DeckEdit) {
        let deleting = matches!(edit, DeckEdit::DeleteSelected);
        let before = self.deck.selected().map(|c| c.id.clone());
        self.deck = self.deck.apply(edit);
        let after = self.deck.selected().map(|c| c.id.clone());
        if before != after {
            self.uploaded_image = self.deck.selected().and_then(|c| c.image.clone());
        }
        if deleting {
            let deck = &self.deck;
            self.analysis_generation.retain(|id, _| deck.find(id).is_some());
            self.analysis_inflight.retain(|id| deck.find(id).is_some());
        }
    }

    pub fn is_analyzing(&self, card_id: &str) -> bool {
        self.analysis_inflight.contains(card_id)
    }

    /// Hands the console inputs to the analysis worker for the selected card.
    /// Returns false (and sends nothing) when there is neither an image nor a
    /// recognised theme keyword.
    pub fn start_analysis(&mut self) -> bool {
        let Some(card_id) = self.deck.selected().map(|c| c.id.clone()) else {
            return false;
        };

        if self.uploaded_image.is_none() && theme_keyword(&self.theme_word).is_none() {
            self.set_toast("Add an image or a theme keyword first");
            return false;
        }

        let generation = self.analysis_generation.entry(card_id.clone()).or_insert(0);
        *generation += 1;

        let req = AnalysisRequest {
            card_id: card_id.clone(),
            generation: *generation,
            image: self.uploaded_image.as_ref().map(|img| img.bytes.clone()),
            theme_text: self.theme_word.clone(),
            mood: self.mood_word.clone(),
            options: self.config.extract,
        };

        if self.analysis_tx.send(req).is_err() {
            log::warn!("analysis worker is gone");
            self.set_toast("Analysis unavailable");
            return false;
        }
        self.analysis_inflight.insert(card_id);
        true
    }

    pub fn drain_analysis_results(&mut self) -> Vec<AnalysisResult> {
        let mut out = Vec::new();
        loop {
            match self.analysis_rx.try_recv() {
                Ok(msg) => out.push(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Applies a worker result to its card. Results for deleted cards or for a
    /// superseded request are dropped.
    pub fn apply_analysis_result(&mut self, res: AnalysisResult) -> bool {
        let latest = self.analysis_generation.get(&res.card_id).copied();
        if latest != Some(res.generation) || self.deck.find(&res.card_id).is_none() {
            log::debug!("discarding stale analysis result for {} (gen {})", res.card_id, res.generation);
            return false;
        }
        self.analysis_inflight.remove(&res.card_id);

        let Some(colors) = res.colors else {
            return false;
        };
        self.edit_deck(DeckEdit::SetColors { id: res.card_id.clone(), colors });
        self.edit_deck(DeckEdit::SetTextColor { id: res.card_id, color: colors[0].contrast_text() });
        self.set_toast(format!("Palette: {} {} {}", colors[0], colors[1], colors[2]));
        true
    }

    pub fn load_image(&mut self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let image = CardImage::new(path, bytes);
        self.uploaded_image = Some(image.clone());
        self.edit_deck(DeckEdit::SetImage(Some(image)));
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.uploaded_image = None;
        self.edit_deck(DeckEdit::SetImage(None));
    }

    pub fn open_prompt(&mut self, target: InputTarget) {
        let card = self.deck.selected();
        self.prompt.buf = match target {
            InputTarget::ImagePath => self
                .uploaded_image
                .as_ref()
                .map(|img| img.path.display().to_string())
                .unwrap_or_default(),
            InputTarget::ThemeWord => self.theme_word.clone(),
            InputTarget::MoodWord => self.mood_word.clone(),
            InputTarget::Field(field) => card
                .map(|c| match field {
                    CardField::Name => c.name.clone(),
                    CardField::Number => c.number.clone(),
                    CardField::Title => c.title.clone(),
                    CardField::Mood => c.mood.clone(),
                })
                .unwrap_or_default(),
            InputTarget::Color(i) => card.and_then(|c| c.colors.get(i)).map(|c| c.to_string()).unwrap_or_default(),
        };
        self.overlay = Overlay::Prompt(target);
    }

    pub fn commit_prompt(&mut self) {
        let Overlay::Prompt(target) = self.overlay else {
            return;
        };
        let value = std::mem::take(&mut self.prompt.buf);
        self.overlay = Overlay::None;

        match target {
            InputTarget::ImagePath => {
                let raw = value.trim();
                if raw.is_empty() {
                    self.clear_image();
                    return;
                }
                let path = expand_home(raw);
                if let Err(e) = self.load_image(&path) {
                    log::warn!("image load failed: {e:#}");
                    self.set_toast(format!("Image error: {e}"));
                }
            }
            InputTarget::ThemeWord => self.theme_word = value,
            InputTarget::MoodWord => self.mood_word = value.trim().to_string(),
            InputTarget::Field(field) => self.edit_deck(DeckEdit::SetField(field, value)),
            InputTarget::Color(i) => match parse_swatch(value.trim()) {
                Ok((color, text)) => {
                    self.edit_deck(DeckEdit::SetColor(i, color));
                    // the title bar sits on the first color
                    if i == 0 {
                        if let Some(id) = self.deck.selected().map(|c| c.id.clone()) {
                            self.edit_deck(DeckEdit::SetTextColor { id, color: text });
                        }
                    }
                }
                Err(e) => self.set_toast(e.to_string()),
            },
        }
    }

    pub fn cycle_theme(&mut self, forward: bool) {
        let mut name = self.theme.name;
        // four steps forward is one step back
        for _ in 0..if forward { 1 } else { 4 } {
            name = name.next();
        }
        self.set_theme(name);
    }

    fn set_theme(&mut self, name: ThemeName) {
        match ThemeLoader::load(name.as_config_key()) {
            Ok(theme) => {
                self.theme = theme;
                self.config.theme = name.as_config_key().to_string();
                self.save_config();
            }
            Err(e) => self.set_toast(format!("Theme error: {e}")),
        }
    }

    pub fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            log::warn!("config save failed: {e:#}");
        }
    }

    pub fn preview(&self, key: PreviewKey) -> Option<Arc<PreviewCells>> {
        self.preview_cache.borrow_mut().get(key)
    }

    pub fn queue_preview_render(&self, key: PreviewKey, bytes: Arc<Vec<u8>>) {
        if self.preview_cache.borrow().contains(key) {
            return;
        }
        if !self.preview_render_inflight.borrow_mut().insert(key) {
            return;
        }
        let _ = self.preview_render_tx.send(PreviewRenderRequest { key, bytes });
    }

    pub fn tick(&mut self, now: Instant) {
        loop {
            match self.preview_render_rx.try_recv() {
                Ok(msg) => {
                    self.preview_render_inflight.borrow_mut().remove(&msg.key);
                    // Undecodable images are cached as empty so they are not re-queued every frame.
                    let cells = msg.cells.unwrap_or_else(PreviewCells::empty);
                    self.preview_cache.borrow_mut().put(msg.key, Arc::new(cells));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        if let Some((_, at)) = &self.toast {
            if now.duration_since(*at) > TOAST_TTL {
                self.toast = None;
            }
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.prompt.buf.clear();
    }
}

/// A typed swatch plus the text color that stays legible on it.
fn parse_swatch(raw: &str) -> Result<(Color, Color), ColorError> {
    let color = raw.parse::<Color>()?;
    Ok((color, contrast_color(raw)?))
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::color::{BLACK, WHITE};
    use crate::ui::theme::{ColorCapability, ThemePalette};

    fn app() -> AppState {
        let grey = (128, 128, 128);
        let theme = Theme {
            name: ThemeName::Mocha,
            palette: ThemePalette {
                text: grey,
                subtext: grey,
                base: grey,
                surface: grey,
                accent: grey,
                accent2: grey,
                accent3: grey,
            },
            capability: ColorCapability::NoColor,
        };
        AppState::new(Config::default(), theme)
    }

    fn result(card_id: &str, generation: u64) -> AnalysisResult {
        AnalysisResult {
            card_id: card_id.into(),
            generation,
            colors: Some([Color::new(1, 1, 1), Color::new(100, 100, 100), Color::new(200, 200, 200)]),
        }
    }

    #[test]
    fn analysis_needs_image_or_keyword() {
        let mut app = app();
        app.theme_word = "没有关键词".into();
        assert!(!app.start_analysis());
        assert!(app.toast.is_some());

        app.theme_word = "旅行海报".into();
        assert!(app.start_analysis());
        assert!(app.is_analyzing("p8"));
    }

    #[test]
    fn only_latest_generation_is_applied() {
        let mut app = app();
        app.theme_word = "宠物".into();
        assert!(app.start_analysis());
        assert!(app.start_analysis());
        assert!(!app.apply_analysis_result(result("p8", 1)));
        assert!(app.apply_analysis_result(result("p8", 2)));
        assert_eq!(app.deck.selected().unwrap().colors[1], Color::new(100, 100, 100));
        assert!(!app.is_analyzing("p8"));
    }

    #[test]
    fn result_lands_on_its_own_card_after_reselect() {
        let mut app = app();
        app.theme_word = "宠物".into();
        assert!(app.start_analysis());
        let p1_before = app.deck.find("p1").unwrap().colors;
        app.edit_deck(DeckEdit::SelectIndex(0));
        assert!(app.apply_analysis_result(result("p8", 1)));
        assert_eq!(app.deck.find("p8").unwrap().colors[0], Color::new(1, 1, 1));
        assert_eq!(app.deck.find("p1").unwrap().colors, p1_before);
    }

    #[test]
    fn result_for_deleted_card_is_dropped() {
        let mut app = app();
        app.theme_word = "宠物".into();
        assert!(app.start_analysis());
        app.edit_deck(DeckEdit::DeleteSelected);
        assert!(app.deck.find("p8").is_none());
        assert!(!app.apply_analysis_result(result("p8", 1)));
    }

    #[test]
    fn deleting_a_card_forgets_its_analysis() {
        let mut app = app();
        app.theme_word = "宠物".into();
        assert!(app.start_analysis());
        app.edit_deck(DeckEdit::SelectIndex(0));
        assert!(app.start_analysis());
        app.edit_deck(DeckEdit::SelectIndex(7));
        app.edit_deck(DeckEdit::DeleteSelected);
        assert!(!app.is_analyzing("p8"));
        assert!(!app.analysis_generation.contains_key("p8"));
        // other cards keep their pending request
        assert!(app.is_analyzing("p1"));
        assert!(app.analysis_generation.contains_key("p1"));
    }

    #[test]
    fn analysed_palette_sets_readable_title_text() {
        let mut app = app();
        app.theme_word = "宠物".into();
        assert_eq!(app.deck.find("p8").unwrap().text_color, BLACK);
        assert!(app.start_analysis());
        assert!(app.apply_analysis_result(result("p8", 1)));
        assert_eq!(app.deck.find("p8").unwrap().text_color, WHITE);
    }

    #[test]
    fn worker_round_trip_updates_selected_card() {
        let mut app = app();
        app.theme_word = "我家的宠物很可爱".into();
        assert!(app.start_analysis());
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut applied = false;
        while !applied && Instant::now() < deadline {
            for res in app.drain_analysis_results() {
                applied |= app.apply_analysis_result(res);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(applied);
        let hex: Vec<String> = app.deck.selected().unwrap().colors.iter().map(|c| c.to_string()).collect();
        assert_eq!(hex, ["#FFB6C1", "#87CEEB", "#98FB98"]);
    }

    #[test]
    fn invalid_color_prompt_keeps_old_color() {
        let mut app = app();
        let before = app.deck.selected().unwrap().colors;
        app.open_prompt(InputTarget::Color(0));
        assert_eq!(app.prompt.buf, before[0].to_string());
        app.prompt.buf = "#12345".into();
        app.commit_prompt();
        assert_eq!(app.deck.selected().unwrap().colors, before);
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.toast.as_ref().unwrap().0.contains("invalid color format"));
    }

    #[test]
    fn valid_color_prompt_applies() {
        let mut app = app();
        app.open_prompt(InputTarget::Color(2));
        app.prompt.buf = "abc".into();
        app.commit_prompt();
        assert_eq!(app.deck.selected().unwrap().colors[2], Color::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn first_color_prompt_updates_title_text() {
        let mut app = app();
        app.open_prompt(InputTarget::Color(2));
        app.prompt.buf = "#263238".into();
        app.commit_prompt();
        assert_eq!(app.deck.selected().unwrap().text_color, BLACK);

        app.open_prompt(InputTarget::Color(0));
        app.prompt.buf = "#263238".into();
        app.commit_prompt();
        let card = app.deck.selected().unwrap();
        assert_eq!(card.colors[0], Color::new(0x26, 0x32, 0x38));
        assert_eq!(card.text_color, WHITE);
    }

    #[test]
    fn image_prompt_loads_file_and_attaches_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let mut app = app();
        app.open_prompt(InputTarget::ImagePath);
        app.prompt.buf = path.display().to_string();
        app.commit_prompt();
        assert_eq!(app.uploaded_image.as_ref().unwrap().bytes.as_slice(), &[1, 2, 3]);
        assert!(app.deck.selected().unwrap().image.is_some());

        // switching away and back restores the card's image in the console
        app.edit_deck(DeckEdit::SelectIndex(0));
        assert!(app.uploaded_image.is_none());
        app.edit_deck(DeckEdit::SelectIndex(7));
        assert!(app.uploaded_image.is_some());
    }

    #[test]
    fn missing_image_file_is_a_toast() {
        let mut app = app();
        app.open_prompt(InputTarget::ImagePath);
        app.prompt.buf = "/definitely/not/here.png".into();
        app.commit_prompt();
        assert!(app.uploaded_image.is_none());
        assert!(app.toast.as_ref().unwrap().0.starts_with("Image error"));
    }

    #[test]
    fn field_prompt_edits_selected_card() {
        let mut app = app();
        app.open_prompt(InputTarget::Field(CardField::Title));
        assert_eq!(app.prompt.buf, "种宠物之家温馨感");
        app.prompt.buf = "种新标题".into();
        app.commit_prompt();
        assert_eq!(app.deck.selected().unwrap().title, "种新标题");
    }
}
