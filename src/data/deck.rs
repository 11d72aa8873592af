use crate::data::presets::{blank_card, preset_cards, FIRST_FREE_ID, INITIAL_SELECTION};
use crate::palette::color::Color;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub path: PathBuf,
    pub bytes: Arc<Vec<u8>>,
    pub hash: u64,
}

impl CardImage {
    pub fn new(path: &Path, bytes: Vec<u8>) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Self {
            path: path.to_path_buf(),
            bytes: Arc::new(bytes),
            hash: hasher.finish(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub number: String,
    pub title: String,
    pub mood: String,
    pub colors: [Color; 3],
    pub text_color: Color,
    pub image: Option<CardImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Name,
    Number,
    Title,
    Mood,
}

impl CardField {
    pub fn label(self) -> &'static str {
        match self {
            CardField::Name => "Name",
            CardField::Number => "Number",
            CardField::Title => "Title",
            CardField::Mood => "Style",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeckEdit {
    SelectIndex(usize),
    /// Grid navigation; `columns` is the current grid width in cards.
    Move { dx: i32, dy: i32, columns: usize },
    AddCard,
    DeleteSelected,
    SetField(CardField, String),
    SetColor(usize, Color),
    SetColors { id: String, colors: [Color; 3] },
    SetTextColor { id: String, color: Color },
    SetImage(Option<CardImage>),
}

/// Session store of cards. Every edit produces a new `Deck`; the old one is left as is.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
    selected: usize,
    next_id: u64,
}

impl Default for Deck {
    fn default() -> Self {
        Self::from_cards(preset_cards(), INITIAL_SELECTION)
    }
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>, selected_id: &str) -> Self {
        let selected = cards.iter().position(|c| c.id == selected_id).unwrap_or(0);
        Self {
            cards,
            selected,
            next_id: FIRST_FREE_ID,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Card> {
        self.cards.get(self.selected)
    }

    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn apply(&self, edit: DeckEdit) -> Deck {
        let mut next = self.clone();
        match edit {
            DeckEdit::SelectIndex(i) => {
                if i < next.cards.len() {
                    next.selected = i;
                }
            }
            DeckEdit::Move { dx, dy, columns } => {
                if !next.cards.is_empty() {
                    let step = dx as i64 + dy as i64 * columns.max(1) as i64;
                    let last = next.cards.len() as i64 - 1;
                    next.selected = (next.selected as i64 + step).clamp(0, last) as usize;
                }
            }
            DeckEdit::AddCard => {
                let id = format!("p{}", next.next_id);
                next.next_id += 1;
                next.cards.push(blank_card(id));
                next.selected = next.cards.len() - 1;
            }
            DeckEdit::DeleteSelected => {
                if next.cards.len() > 1 {
                    next.cards.remove(next.selected);
                    next.selected = 0;
                }
            }
            DeckEdit::SetField(field, value) => {
                if let Some(card) = next.cards.get_mut(next.selected) {
                    match field {
                        CardField::Name => card.name = value,
                        CardField::Number => card.number = value,
                        CardField::Title => card.title = value,
                        CardField::Mood => card.mood = value,
                    }
                }
            }
            DeckEdit::SetColor(index, color) => {
                if let Some(card) = next.cards.get_mut(next.selected) {
                    if let Some(slot) = card.colors.get_mut(index) {
                        *slot = color;
                    }
                }
            }
            DeckEdit::SetColors { id, colors } => {
                if let Some(card) = next.cards.iter_mut().find(|c| c.id == id) {
                    card.colors = colors;
                }
            }
            DeckEdit::SetTextColor { id, color } => {
                if let Some(card) = next.cards.iter_mut().find(|c| c.id == id) {
                    card.text_color = color;
                }
            }
            DeckEdit::SetImage(image) => {
                if let Some(card) = next.cards.get_mut(next.selected) {
                    card.image = image;
                }
            }
        }
        next
    }
}
