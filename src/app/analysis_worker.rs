use crate::palette::pipeline::{recompute_palette, PaletteRequest};
use crate::palette::Color;
use crate::render::dominant_color::ExtractOptions;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub card_id: String,
    /// Increases with every request for the same card; only the latest one counts.
    pub generation: u64,
    pub image: Option<Arc<Vec<u8>>>,
    pub theme_text: String,
    pub mood: String,
    /// `None` uses the built-in extraction defaults.
    pub options: Option<ExtractOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub card_id: String,
    pub generation: u64,
    /// `None` when there was nothing to derive a palette from.
    pub colors: Option<[Color; 3]>,
}

pub fn start_analysis_worker() -> (Sender<AnalysisRequest>, Receiver<AnalysisResult>) {
    let (tx, rx) = mpsc::channel::<AnalysisRequest>();
    let (res_tx, res_rx) = mpsc::channel::<AnalysisResult>();

    std::thread::spawn(move || worker_loop(rx, res_tx));
    (tx, res_rx)
}

fn worker_loop(rx: Receiver<AnalysisRequest>, res_tx: Sender<AnalysisResult>) {
    let mut rng = StdRng::from_entropy();
    while let Ok(req) = rx.recv() {
        let res = run_request(&req, &mut rng);
        if res_tx.send(res).is_err() {
            log::debug!("analysis result receiver gone; worker exiting");
            break;
        }
    }
}

pub fn run_request<R: Rng + ?Sized>(req: &AnalysisRequest, rng: &mut R) -> AnalysisResult {
    log::debug!(
        "analysing card {} (gen {}): image={} theme={:?} mood={:?}",
        req.card_id,
        req.generation,
        req.image.is_some(),
        req.theme_text,
        req.mood
    );
    let palette_req = PaletteRequest {
        image: req.image.as_deref().map(|b| b.as_slice()),
        theme_text: &req.theme_text,
        mood: &req.mood,
    };
    let colors = recompute_palette(&palette_req, req.options.as_ref(), rng);
    if let Some(c) = colors.as_ref() {
        log::debug!("card {} palette: {} {} {}", req.card_id, c[0], c[1], c[2]);
    }
    AnalysisResult {
        card_id: req.card_id.clone(),
        generation: req.generation,
        colors,
    }
}
