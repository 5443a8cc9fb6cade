//! # トレーシング初期化
//!
//! ログの出力形式は `LOG_FORMAT`（`json` / `pretty`）、フィルタは `RUST_LOG` で指定する。
//! どちらも未設定なら pretty 形式・[`DEFAULT_FILTER`] で出力する。

use std::str::FromStr;

pub const DEFAULT_FILTER: &str = "info,qna=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON。ログ基盤に取り込む環境向け
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("unknown LOG_FORMAT={other:?}")),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` を読む
    ///
    /// 不正な値は pretty として扱う。subscriber の設定前なので警告は stderr に出す。
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(value) => value.parse().unwrap_or_else(|message| {
                eprintln!("WARNING: {message}, falling back to pretty");
                Self::Pretty
            }),
            Err(_) => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` がないときのフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_FILTER.to_owned(),
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` を重ねるので、`InfraError` が保持する `SpanTrace` に
/// リポジトリメソッドのスパンが残る。2 回目以降の呼び出しはエラーになる。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: &TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{EnvFilter, Layer as _, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let output = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
}
