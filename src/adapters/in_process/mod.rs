//! HTTPを経由せず、各サービスのアプリケーション層を直接呼ぶクライアント。
//! ゲートウェイのテストはこれらに対してサガを実行する。

pub mod catalog_client;
pub mod rating_client;
pub mod reservation_client;

pub use catalog_client::CatalogClient;
pub use rating_client::RatingClient;
pub use reservation_client::ReservationClient;

use crate::application::ServiceError;
use crate::ports::ClientError;

/// サービスのエラーを、HTTP層が返すはずのステータスに変換する
pub(crate) fn to_client_error(err: ServiceError) -> ClientError {
    let status = match &err {
        ServiceError::BadRequest(_) => 400,
        ServiceError::NotFound(_) => 404,
        ServiceError::StoreError(_) => 500,
    };
    ClientError::Status {
        status,
        message: err.to_string(),
    }
}
