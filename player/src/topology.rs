//! The fixed pipeline topologies, described as data.
//!
//! The audio+video and video-only variants differ only in which
//! branches are selected, so both share one construction path.

use crate::config::Config;
use udplay_types::{BranchSpec, CapsSpec, ElementSpec};

/// Video branch: H.264 over UDP in, scaled raw video out to a local sink.
pub fn video_branch(config: &Config) -> BranchSpec {
    BranchSpec::new("video")
        .element(
            ElementSpec::new("video_udpsrc", "udpsrc")
                .property("port", i64::from(config.video_port)),
        )
        .element(ElementSpec::new("h264parse", "h264parse"))
        .element(ElementSpec::new("avdec_h264", "avdec_h264"))
        .element(ElementSpec::new("videoscale", "videoscale"))
        .element(
            ElementSpec::new("video_scale_caps_filter", "capsfilter").caps(
                CapsSpec::new("video/x-raw")
                    .field("width", config.width)
                    .field("height", config.height),
            ),
        )
        .element(ElementSpec::new("autovideosink", "autovideosink"))
}

/// Audio branch: raw interleaved PCM over UDP in, converted and
/// resampled to a local sink.
pub fn audio_branch(config: &Config) -> BranchSpec {
    BranchSpec::new("audio")
        .element(
            ElementSpec::new("audio_udpsrc", "udpsrc")
                .property("port", i64::from(config.audio_port)),
        )
        .element(
            ElementSpec::new("audio_init_caps_filter", "capsfilter").caps(
                CapsSpec::new("audio/x-raw")
                    .field("format", config.audio_format.as_str())
                    .field("channels", config.audio_channels)
                    .field("layout", "interleaved")
                    .field("rate", config.audio_rate),
            ),
        )
        .element(ElementSpec::new("audioconvert", "audioconvert"))
        .element(ElementSpec::new("audioresample", "audioresample"))
        .element(ElementSpec::new("autoaudiosink", "autoaudiosink"))
}

/// The branches selected by the configuration: always video, plus
/// audio when enabled.
pub fn branches(config: &Config) -> Vec<BranchSpec> {
    let mut branches = vec![video_branch(config)];
    if config.audio_enabled {
        branches.push(audio_branch(config));
    }
    branches
}

#[cfg(test)]
mod tests {
    use super::*;
    use udplay_types::{CapsValue, PropertyValue};

    #[test]
    fn video_branch_has_expected_chain() {
        let config = Config::default();
        let branch = video_branch(&config);

        let ids: Vec<&str> = branch.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "video_udpsrc",
                "h264parse",
                "avdec_h264",
                "videoscale",
                "video_scale_caps_filter",
                "autovideosink",
            ]
        );

        let types: Vec<&str> = branch
            .elements
            .iter()
            .map(|e| e.element_type.as_str())
            .collect();
        assert_eq!(
            types,
            [
                "udpsrc",
                "h264parse",
                "avdec_h264",
                "videoscale",
                "capsfilter",
                "autovideosink",
            ]
        );
    }

    #[test]
    fn video_branch_carries_port_and_scale_caps() {
        let config = Config::default();
        let branch = video_branch(&config);

        let src = &branch.elements[0];
        assert_eq!(
            src.properties.get("port"),
            Some(&PropertyValue::Int(13131))
        );

        let filter = &branch.elements[4];
        let caps = filter.caps.as_ref().unwrap();
        assert_eq!(caps.media_type, "video/x-raw");
        assert_eq!(
            caps.fields,
            [
                ("width".to_string(), CapsValue::Int(1920)),
                ("height".to_string(), CapsValue::Int(920)),
            ]
        );
    }

    #[test]
    fn audio_branch_has_expected_chain_and_caps() {
        let config = Config::default();
        let branch = audio_branch(&config);

        let ids: Vec<&str> = branch.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "audio_udpsrc",
                "audio_init_caps_filter",
                "audioconvert",
                "audioresample",
                "autoaudiosink",
            ]
        );

        let src = &branch.elements[0];
        assert_eq!(
            src.properties.get("port"),
            Some(&PropertyValue::Int(12121))
        );

        let caps = branch.elements[1].caps.as_ref().unwrap();
        assert_eq!(caps.media_type, "audio/x-raw");
        assert_eq!(
            caps.fields,
            [
                ("format".to_string(), CapsValue::String("S16LE".to_string())),
                ("channels".to_string(), CapsValue::Int(2)),
                (
                    "layout".to_string(),
                    CapsValue::String("interleaved".to_string())
                ),
                ("rate".to_string(), CapsValue::Int(44100)),
            ]
        );
    }

    #[test]
    fn branch_selection_follows_config() {
        let mut config = Config::default();
        let both = branches(&config);
        assert_eq!(both.len(), 2);
        assert_eq!(both[0].name, "video");
        assert_eq!(both[1].name, "audio");

        config.audio_enabled = false;
        let video_only = branches(&config);
        assert_eq!(video_only.len(), 1);
        assert_eq!(video_only[0].name, "video");
    }

    #[test]
    fn config_overrides_flow_into_specs() {
        let config = Config {
            video_port: 5004,
            width: 1280,
            height: 720,
            ..Config::default()
        };
        let branch = video_branch(&config);
        assert_eq!(
            branch.elements[0].properties.get("port"),
            Some(&PropertyValue::Int(5004))
        );
        let caps = branch.elements[4].caps.as_ref().unwrap();
        assert_eq!(
            caps.fields,
            [
                ("width".to_string(), CapsValue::Int(1280)),
                ("height".to_string(), CapsValue::Int(720)),
            ]
        );
    }
}
