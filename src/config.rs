//! 環境変数から読み込む起動時の設定
//!
//! 各バイナリは起動時に一度だけ読み込み、以降は変更しない。

/// ゲートウェイの既定ポート
pub const GATEWAY_PORT: u16 = 8080;
/// 図書館サービスの既定ポート
pub const LIBRARY_SERVICE_PORT: u16 = 8060;
/// 評価サービスの既定ポート
pub const RATING_SERVICE_PORT: u16 = 8050;
/// 予約サービスの既定ポート
pub const RESERVATION_SERVICE_PORT: u16 = 8070;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ADMIN_TOKEN: &str = "admin";

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// HTTPサーバーの設定
///
/// - `HOST` - バインドアドレス（既定: `0.0.0.0`）
/// - `PORT` - 待ち受けポート（既定はサービスごと）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env(default_port: u16) -> Self {
        Self::from_lookup(default_port, env_lookup)
    }

    /// 任意の読み込み関数から設定を組み立てる
    ///
    /// 解釈できない `PORT` は既定値に戻す。
    pub fn from_lookup(default_port: u16, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
        }
    }

    /// `host:port` 形式のバインドアドレス
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// データベース接続の設定
///
/// - `DATABASE_URL` - 接続文字列（既定はサービスごと）
/// - `DATABASE_MAX_CONNECTIONS` - プールの最大接続数（既定: 5）
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env(default_url: &str) -> Self {
        Self::from_lookup(default_url, env_lookup)
    }

    pub fn from_lookup(default_url: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup("DATABASE_URL").unwrap_or_else(|| default_url.to_string()),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

// 接続文字列にはパスワードが含まれるため出力しない
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"***")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// ゲートウェイの下流サービスと管理者トークンの設定
///
/// - `LIBRARY_SERVICE_URL`（既定: `http://library-service:8060`）
/// - `RATING_SERVICE_URL`（既定: `http://rating-service:8050`）
/// - `RESERVATION_SERVICE_URL`（既定: `http://reservation-service:8070`）
/// - `ADMIN_TOKEN`（既定: `admin`）
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub library_service_url: String,
    pub rating_service_url: String,
    pub reservation_service_url: String,
    pub admin_token: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            library_service_url: lookup("LIBRARY_SERVICE_URL")
                .unwrap_or(defaults.library_service_url),
            rating_service_url: lookup("RATING_SERVICE_URL").unwrap_or(defaults.rating_service_url),
            reservation_service_url: lookup("RESERVATION_SERVICE_URL")
                .unwrap_or(defaults.reservation_service_url),
            admin_token: lookup("ADMIN_TOKEN").unwrap_or(defaults.admin_token),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            library_service_url: format!("http://library-service:{}", LIBRARY_SERVICE_PORT),
            rating_service_url: format!("http://rating-service:{}", RATING_SERVICE_PORT),
            reservation_service_url: format!(
                "http://reservation-service:{}",
                RESERVATION_SERVICE_PORT
            ),
            admin_token: DEFAULT_ADMIN_TOKEN.to_string(),
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("library_service_url", &self.library_service_url)
            .field("rating_service_url", &self.rating_service_url)
            .field("reservation_service_url", &self.reservation_service_url)
            .field("admin_token", &"***")
            .finish()
    }
}
