use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, info, warn};

use crate::error::SoundError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundStatus {
    Loading,
    Loaded,
    Failed,
}

/// A playable sound whose loading may finish some time after creation.
pub trait SoundCue {
    fn status(&mut self) -> SoundStatus;
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn stop(&mut self);

    fn is_loaded(&mut self) -> bool {
        self.status() == SoundStatus::Loaded
    }
}

enum AudioCommand {
    Play,
    Stop,
}

enum LoadReport {
    Loaded,
    Failed(SoundError),
}

struct DecodedSound {
    channels: u16,
    sample_rate: u32,
    samples: Arc<Vec<i16>>,
}

impl DecodedSound {
    fn load(path: &Path) -> Result<Self, SoundError> {
        let file = File::open(path).map_err(|source| SoundError::Open { path: path.to_path_buf(), source })?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|source| SoundError::Decode { path: path.to_path_buf(), source })?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<i16> = decoder.collect();
        Ok(Self { channels, sample_rate, samples: Arc::new(samples) })
    }

    fn buffer(&self) -> SamplesBuffer<i16> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.as_ref().clone())
    }
}

/// rodio-backed [`SoundCue`]. The output stream is not `Send`, so decoding and
/// playback live on a dedicated thread that is driven through a channel.
pub struct RodioSound {
    path: PathBuf,
    tx: Sender<AudioCommand>,
    reports: Receiver<LoadReport>,
    status: SoundStatus,
    playing: Arc<AtomicBool>,
}

impl RodioSound {
    pub fn new(path: &Path, volume: f32, looping: bool) -> Result<Self, SoundError> {
        if !path.exists() {
            return Err(SoundError::NotFound(path.to_path_buf()));
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let (report_tx, reports) = mpsc::channel::<LoadReport>();
        let playing = Arc::new(AtomicBool::new(false));

        let worker_path = path.to_path_buf();
        let worker_playing = Arc::clone(&playing);
        thread::Builder::new()
            .name("audio".into())
            .spawn(move || run_worker(worker_path, volume, looping, rx, report_tx, worker_playing))
            .map_err(|err| SoundError::OutputUnavailable(err.to_string()))?;

        info!(path = %path.display(), "sound configured");
        Ok(Self {
            path: path.to_path_buf(),
            tx,
            reports,
            status: SoundStatus::Loading,
            playing,
        })
    }

    /// Opens `path` if given, logging and returning `None` when it cannot be used.
    pub fn open_optional(path: Option<&Path>, volume: f32, looping: bool) -> Option<Self> {
        let Some(path) = path else {
            info!("no sound configured");
            return None;
        };
        match Self::new(path, volume, looping) {
            Ok(sound) => Some(sound),
            Err(err) => {
                warn!(error = %err, "sound unavailable, running silent");
                None
            }
        }
    }

    fn send(&mut self, command: AudioCommand) {
        if self.tx.send(command).is_err() && self.status != SoundStatus::Failed {
            warn!(error = %SoundError::WorkerGone, path = %self.path.display(), "sound disabled");
            self.status = SoundStatus::Failed;
        }
    }
}

impl SoundCue for RodioSound {
    fn status(&mut self) -> SoundStatus {
        while let Ok(report) = self.reports.try_recv() {
            self.status = match report {
                LoadReport::Loaded => {
                    debug!(path = %self.path.display(), "sound loaded");
                    SoundStatus::Loaded
                }
                LoadReport::Failed(err) => {
                    warn!(error = %err, "sound unavailable, running silent");
                    SoundStatus::Failed
                }
            };
        }
        self.status
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }
}

const WORKER_POLL: Duration = Duration::from_millis(50);

fn run_worker(
    path: PathBuf,
    volume: f32,
    looping: bool,
    rx: Receiver<AudioCommand>,
    reports: Sender<LoadReport>,
    playing: Arc<AtomicBool>,
) {
    let sound = match DecodedSound::load(&path) {
        Ok(sound) => sound,
        Err(err) => {
            let _ = reports.send(LoadReport::Failed(err));
            return;
        }
    };
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(err) => {
            let _ = reports.send(LoadReport::Failed(SoundError::OutputUnavailable(err.to_string())));
            return;
        }
    };
    let _ = reports.send(LoadReport::Loaded);

    let mut sink: Option<Sink> = None;
    loop {
        match rx.recv_timeout(WORKER_POLL) {
            Ok(AudioCommand::Play) => {
                if let Some(previous) = sink.take() {
                    previous.stop();
                }
                match Sink::try_new(&handle) {
                    Ok(new_sink) => {
                        new_sink.set_volume(volume.clamp(0.0, 2.0));
                        if looping {
                            new_sink.append(sound.buffer().repeat_infinite());
                        } else {
                            new_sink.append(sound.buffer());
                        }
                        sink = Some(new_sink);
                    }
                    Err(err) => warn!(?err, "failed to create audio sink"),
                }
            }
            Ok(AudioCommand::Stop) => {
                if let Some(previous) = sink.take() {
                    previous.stop();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        playing.store(sink.as_ref().is_some_and(|s| !s.empty()), Ordering::Relaxed);
    }
    playing.store(false, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sound_is_rejected_up_front() {
        let err = RodioSound::new(Path::new("nope/missing.wav"), 1.0, false).err();
        assert!(matches!(err, Some(SoundError::NotFound(_))));
    }

    #[test]
    fn missing_optional_sound_degrades_to_silent() {
        assert!(RodioSound::open_optional(Some(Path::new("nope/missing.wav")), 1.0, false).is_none());
        assert!(RodioSound::open_optional(None, 1.0, false).is_none());
    }

    #[test]
    fn undecodable_sound_reports_failure() {
        let file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        std::fs::write(file.path(), b"definitely not audio").unwrap();
        let mut sound = RodioSound::new(file.path(), 1.0, false).unwrap();

        let mut status = sound.status();
        for _ in 0..100 {
            if status != SoundStatus::Loading {
                break;
            }
            thread::sleep(Duration::from_millis(10));
            status = sound.status();
        }
        assert_eq!(status, SoundStatus::Failed);
        assert!(!sound.is_playing());
    }
}
