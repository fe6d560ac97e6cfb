//! Test doubles shared by the unit tests of this crate

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wavecache_core::graphics::{
    GraphicsError, GraphicsResult, ImageFormat, ImageHandle, Painter, PainterImage, Rect, Renderer,
    RendererId, RendererPriority,
};

use crate::wave_data::{DataProvider, MinMaxRms, SampleBlockType, WaveCacheSampleBlock};

/// Route `log` output to the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Raw samples served per provider call
const SAMPLES_PER_BLOCK: usize = 4096;

/// Decimated entries served per provider call
const ENTRIES_PER_BLOCK: usize = 64;

/// In-memory audio with controllable availability
///
/// Clones share state, so a test keeps one handle while the cache owns the
/// provider built from another.
#[derive(Clone, Default)]
pub struct SyntheticAudio {
    samples: Rc<RefCell<Vec<f32>>>,
    available: Rc<Cell<usize>>,
    failing: Rc<Cell<bool>>,
    requests: Rc<RefCell<HashMap<SampleBlockType, usize>>>,
}

impl SyntheticAudio {
    pub fn from_samples(samples: Vec<f32>) -> Self {
        let audio = Self::default();
        audio.available.set(samples.len());
        *audio.samples.borrow_mut() = samples;
        audio
    }

    /// Sawtooth rising from 0 to just below 1 every 1000 samples
    pub fn ramp(len: usize) -> Self {
        Self::from_samples((0..len).map(|i| (i % 1000) as f32 / 1000.0).collect())
    }

    pub fn sine(len: usize, frequency: f64, amplitude: f32) -> Self {
        let step = std::f64::consts::TAU * frequency / 44100.0;
        Self::from_samples((0..len).map(|i| amplitude * (i as f64 * step).sin() as f32).collect())
    }

    pub fn constant(len: usize, value: f32) -> Self {
        Self::from_samples(vec![value; len])
    }

    pub fn samples(&self) -> Vec<f32> {
        self.samples.borrow().clone()
    }

    /// Pretend only the first `count` samples are decoded
    pub fn set_available(&self, count: usize) {
        self.available.set(count);
    }

    /// Make every provider call report a hard failure
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn scale(&self, factor: f32) {
        for sample in self.samples.borrow_mut().iter_mut() {
            *sample *= factor;
        }
    }

    pub fn requests_for(&self, data_type: SampleBlockType) -> usize {
        self.requests.borrow().get(&data_type).copied().unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.requests.borrow().values().sum()
    }

    pub fn provider(&self) -> DataProvider {
        let audio = self.clone();

        Box::new(move |required: i64, data_type: SampleBlockType, block: &mut WaveCacheSampleBlock| {
            if audio.failing.get() {
                return false;
            }
            *audio.requests.borrow_mut().entry(data_type).or_default() += 1;

            let samples = audio.samples.borrow();
            let end = audio.available.get().min(samples.len());

            if required < 0 || required as usize >= end {
                block.reset();
                return true;
            }
            let required = required as usize;

            match data_type {
                SampleBlockType::Samples => {
                    let stop = (required + SAMPLES_PER_BLOCK).min(end);
                    block.write_samples(required as i64, &samples[required..stop]);
                }
                decimated => {
                    let per_entry = decimated.samples_per_entry() as usize;
                    let start = required - required % per_entry;
                    let stop = (start + per_entry * ENTRIES_PER_BLOCK).min(end);

                    let entries: Vec<MinMaxRms> = (start..stop)
                        .step_by(per_entry)
                        .map(|from| MinMaxRms::from_samples(&samples[from..(from + per_entry).min(stop)]))
                        .collect();
                    block.write_summaries(decimated, start as i64, &entries, (stop - start) as u64);
                }
            }

            true
        })
    }
}

/// Image recorded by [`MockRenderer`]
#[derive(Debug)]
pub struct MockImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub renderer_id: RendererId,
    pub data: Option<Vec<u8>>,
}

impl MockImage {
    /// RGB triple at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let data = self.data.as_ref()?;
        let offset = ((y * self.width + x) as usize) * self.format.bytes_per_pixel();
        let bytes = data.get(offset..offset + 3)?;
        Some([bytes[0], bytes[1], bytes[2]])
    }
}

impl PainterImage for MockImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn renderer_id(&self) -> RendererId {
        self.renderer_id.clone()
    }
}

/// Renderer that keeps every image it creates
pub struct MockRenderer {
    id: RendererId,
    pub images: RefCell<Vec<Rc<MockImage>>>,
    pub fail: Cell<bool>,
}

impl MockRenderer {
    pub fn new(id: usize) -> Rc<Self> {
        Rc::new(Self {
            id: RendererId::new("mock", id, RendererPriority::Preferred),
            images: RefCell::new(Vec::new()),
            fail: Cell::new(false),
        })
    }

    pub fn image_count(&self) -> usize {
        self.images.borrow().len()
    }

    pub fn last_image(&self) -> Option<Rc<MockImage>> {
        self.images.borrow().last().cloned()
    }
}

impl Renderer for MockRenderer {
    fn id(&self) -> RendererId {
        self.id.clone()
    }

    fn create_image(
        &self,
        format: ImageFormat,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> GraphicsResult<ImageHandle> {
        if self.fail.get() {
            return Err(GraphicsError::ImageCreationFailed {
                renderer: self.id.to_string(),
                reason: "mock failure".to_string(),
            });
        }
        format.validate(width, height, data)?;

        let image = Rc::new(MockImage {
            format,
            width,
            height,
            renderer_id: self.id.clone(),
            data: data.map(<[u8]>::to_vec),
        });
        self.images.borrow_mut().push(image.clone());
        Ok(image)
    }
}

/// One `draw_image` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub dest: Rect,
    pub source: Rect,
    pub image_width: u32,
}

/// Painter that records what it is asked to draw
pub struct MockPainter {
    renderer: Rc<MockRenderer>,
    pub draws: Vec<DrawCall>,
    pub clip: Option<Rect>,
}

impl MockPainter {
    pub fn new(renderer: Rc<MockRenderer>) -> Self {
        Self {
            renderer,
            draws: Vec::new(),
            clip: None,
        }
    }
}

impl Painter for MockPainter {
    fn renderer(&self) -> Rc<dyn Renderer> {
        self.renderer.clone()
    }

    fn draw_image(&mut self, image: &dyn PainterImage, dest: Rect, source: Rect) {
        self.draws.push(DrawCall {
            dest,
            source,
            image_width: image.width(),
        });
    }

    fn set_clip_rect(&mut self, rect: Option<Rect>) {
        self.clip = rect;
    }
}
