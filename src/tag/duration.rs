use crate::tag::error::{TagError, TagResult};
use log::debug;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

/// Playback length of the default audio track in milliseconds.
///
/// Uses the frame count from the stream header when present, otherwise sums
/// packet durations up to the end of the stream.
pub fn measure_duration_ms(path: &Path) -> TagResult<u32> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let mut probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| TagError::NoAudioTrack(path.display().to_string()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let Some(time_base) = params.time_base else {
        return Err(TagError::NoAudioTrack(path.display().to_string()));
    };

    if let Some(n_frames) = params.n_frames {
        return Ok(to_millis(time_base, n_frames));
    }

    debug!("No frame count in stream header, scanning packets");
    let mut n_frames = 0u64;
    loop {
        match probed.format.next_packet() {
            Ok(packet) if packet.track_id() == track_id => n_frames += packet.dur,
            Ok(_) => {}
            Err(SymphoniaError::IoError(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(to_millis(time_base, n_frames))
}

fn to_millis(time_base: TimeBase, ts: u64) -> u32 {
    let Time { seconds, frac } = time_base.calc_time(ts);
    let millis = seconds.saturating_mul(1000) + (frac * 1000.0).round() as u64;
    u32::try_from(millis).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::silent_mp3;
    use std::io::Write;

    #[test]
    fn millis_are_rounded() {
        let time_base = TimeBase::new(1, 44_100);
        assert_eq!(to_millis(time_base, 44_100), 1000);
        assert_eq!(to_millis(time_base, 11_520), 261);
        assert_eq!(to_millis(TimeBase::new(1, 1), u64::MAX / 1000), u32::MAX);
    }

    #[test]
    fn measures_constant_bitrate_stream() {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(&silent_mp3(40)).unwrap();

        // 40 * 1152 / 44100 s
        let duration = measure_duration_ms(file.path()).unwrap();
        assert!((1000..=1100).contains(&duration), "{duration}");
    }

    #[test]
    fn non_audio_input_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(b"definitely not audio").unwrap();

        assert!(measure_duration_ms(file.path()).is_err());
    }
}
