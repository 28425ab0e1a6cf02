use crate::constants::{ANALYSER_SMOOTHING, FFT_SIZE};
use web_sys as web;

/// The page's audio graph: media element -> analyser -> destination. The
/// analyser taps the signal for visuals; audio passes through untouched.
pub struct AudioGraph {
    pub ctx: web::AudioContext,
    pub analyser: web::AnalyserNode,
}

/// Build the graph lazily at first play. Failures are logged and surfaced
/// by the caller; a later click may retry.
pub fn init_audio(media: &web::HtmlMediaElement) -> Result<AudioGraph, ()> {
    let ctx = web::AudioContext::new().map_err(|e| {
        log::error!("AudioContext error: {:?}", e);
    })?;
    _ = ctx.resume();

    let analyser = ctx.create_analyser().map_err(|e| {
        log::error!("AnalyserNode error: {:?}", e);
    })?;
    analyser.set_fft_size(FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);

    let source = ctx.create_media_element_source(media).map_err(|e| {
        log::error!("MediaElementSource error: {:?}", e);
    })?;
    source.connect_with_audio_node(&analyser).map_err(|e| {
        log::error!("connect error: {:?}", e);
    })?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| {
            log::error!("connect error: {:?}", e);
        })?;

    log::info!("audio graph ready ({} bins)", analyser.frequency_bin_count());
    Ok(AudioGraph { ctx, analyser })
}

/// Per-frame spectrum sampler over a reused byte buffer. `sample` is meant
/// to be called once per animation frame by its owner; independent owners
/// (frame loop, clock) each hold their own instance.
pub struct Spectrum {
    analyser: web::AnalyserNode,
    data: Vec<u8>,
}

impl Spectrum {
    pub fn new(analyser: web::AnalyserNode) -> Self {
        let bins = analyser.frequency_bin_count() as usize;
        Self {
            analyser,
            data: vec![0; bins],
        }
    }

    pub fn sample(&mut self) -> &[u8] {
        self.analyser.get_byte_frequency_data(&mut self.data);
        &self.data
    }
}
