use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use eframe::egui;
use image::ImageReader;

const THUMB_MAX: u32 = 320;

struct ThumbData {
    path: PathBuf,
    size: [usize; 2],
    pixels: Vec<u8>,
}

/// First-frame thumbnails decoded off the UI thread.
pub struct ThumbCache {
    textures: HashMap<PathBuf, egui::TextureHandle>,
    failed: HashSet<PathBuf>,
    inflight: HashSet<PathBuf>,
    tx: Sender<ThumbData>,
    rx: Receiver<ThumbData>,
}

impl Default for ThumbCache {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            textures: HashMap::new(),
            failed: HashSet::new(),
            inflight: HashSet::new(),
            tx,
            rx,
        }
    }
}

impl ThumbCache {
    pub fn clear(&mut self) {
        self.textures.clear();
        self.failed.clear();
        self.inflight.clear();
    }

    pub fn is_loading(&self) -> bool {
        !self.inflight.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&egui::TextureHandle> {
        self.textures.get(path)
    }

    pub fn has_failed(&self, path: &Path) -> bool {
        self.failed.contains(path)
    }

    pub fn request(&mut self, path: &Path) {
        if self.textures.contains_key(path) || self.inflight.contains(path) || self.failed.contains(path) {
            return;
        }
        self.inflight.insert(path.to_path_buf());
        let sender = self.tx.clone();
        let path_owned = path.to_path_buf();

        std::thread::spawn(move || {
            let msg = match decode_first_frame(&path_owned) {
                Ok((size, pixels)) => ThumbData { path: path_owned, size, pixels },
                Err(err) => {
                    log::warn!("{err:#}");
                    ThumbData { path: path_owned, size: [0, 0], pixels: Vec::new() }
                }
            };
            let _ = sender.send(msg);
        });
    }

    /// Uploads finished decodes as textures. Call once per frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            // Results for a page that was already replaced are dropped.
            if !self.inflight.remove(&msg.path) {
                continue;
            }
            if msg.size[0] == 0 || msg.size[1] == 0 {
                self.failed.insert(msg.path);
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(msg.size, &msg.pixels);
            let texture = ctx.load_texture(msg.path.to_string_lossy(), color_image, egui::TextureOptions::default());
            self.textures.insert(msg.path, texture);
        }
    }
}

fn decode_first_frame(path: &Path) -> Result<([usize; 2], Vec<u8>)> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("read {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;
    let thumb = image.thumbnail(THUMB_MAX, THUMB_MAX);
    let size = [thumb.width() as usize, thumb.height() as usize];
    Ok((size, thumb.to_rgba8().into_raw()))
}
