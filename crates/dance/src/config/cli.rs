use anyhow::{Result, ensure};
use clap::{Parser, ValueEnum};

use dance_engine::camera::{PathShape, ViewProjection};
use dance_engine::device::GpuInit;
use dance_engine::frame_loop::{LoopConfig, StepPolicy};
use dance_engine::input::Key;
use dance_engine::logging::LoggingConfig;
use dance_engine::window::{LogicalSize, RuntimeConfig};

const SAMPLE_COUNTS: [u32; 5] = [1, 2, 4, 8, 16];

/// Keys that can end the animation.
#[derive(ValueEnum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum QuitKey {
    Escape,
    Enter,
    Space,
    Q,
}

impl From<QuitKey> for Key {
    fn from(key: QuitKey) -> Self {
        match key {
            QuitKey::Escape => Key::Escape,
            QuitKey::Enter => Key::Enter,
            QuitKey::Space => Key::Space,
            QuitKey::Q => Key::Q,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dance", version)]
#[command(about = "Dance of Triangles: a camera swinging along an epitrochoid around three additively blended meshes")]
pub struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 1200)]
    pub height: u32,

    /// Camera path advance per presented frame
    #[arg(long, default_value_t = 0.001)]
    pub step: f64,

    /// Advance RATE per second of elapsed time instead of a fixed step per frame
    #[arg(long, value_name = "RATE")]
    pub per_second: Option<f64>,

    /// Path shape parameter `a`
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub shape_a: f64,

    /// Path shape parameter `b` (non-zero)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub shape_b: f64,

    /// Amplitude of the sideways swing
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    pub radius: f64,

    /// MSAA sample count (1, 2, 4, 8 or 16)
    #[arg(long, default_value_t = 4)]
    pub samples: u32,

    /// Key that ends the animation
    #[arg(long, value_enum, default_value_t = QuitKey::Escape)]
    pub quit_key: QuitKey,

    /// Present without waiting for vertical refresh
    #[arg(long)]
    pub no_vsync: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

impl Cli {
    /// Rejects values the camera math or the GPU cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0 && self.height > 0, "window size must be non-zero");
        ensure!(self.step.is_finite(), "--step must be finite");
        if let Some(rate) = self.per_second {
            ensure!(rate.is_finite(), "--per-second must be finite");
        }
        ensure!(
            self.shape_a.is_finite() && self.shape_b.is_finite(),
            "path shape parameters must be finite"
        );
        ensure!(self.shape_b != 0.0, "--shape-b must be non-zero");
        ensure!(
            self.radius.is_finite() && self.radius != 0.0,
            "--radius must be finite and non-zero"
        );
        ensure!(
            SAMPLE_COUNTS.contains(&self.samples),
            "--samples must be one of {SAMPLE_COUNTS:?}"
        );
        Ok(())
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..Default::default()
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: LogicalSize::new(self.width as f64, self.height as f64),
            quit_key: self.quit_key.into(),
            ..Default::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            sample_count: self.samples,
            ..Default::default()
        }
        .vsync(!self.no_vsync)
    }

    pub fn view_projection(&self) -> ViewProjection {
        ViewProjection {
            radius: self.radius,
            shape: PathShape::new(self.shape_a, self.shape_b),
            ..Default::default()
        }
    }

    pub fn loop_config(&self) -> LoopConfig {
        let step = match self.per_second {
            Some(rate) => StepPolicy::PerSecond(rate),
            None => StepPolicy::Fixed(self.step),
        };
        LoopConfig {
            step,
            ..Default::default()
        }
    }
}
