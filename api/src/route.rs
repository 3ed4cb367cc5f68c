use rigdash_models::AssetTypeCode;
use std::fmt::{Display, Formatter, Result as FmtResult};

pub enum Route<'a> {
    AssetById { asset_id: u64 },
    ActiveChild { asset_id: u64 },
    AssetsByTypes { types: &'a [AssetTypeCode] },
}

impl Route<'_> {
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self)
    }
}

impl Display for Route<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Route::AssetById { asset_id } => write!(f, "/v1/assets/{}", asset_id),
            Route::ActiveChild { asset_id } => {
                write!(f, "/v1/assets/{}/active_child", asset_id)
            }
            Route::AssetsByTypes { types } => {
                f.write_str("/v1/assets")?;
                for (i, code) in types.iter().enumerate() {
                    let sep = if i == 0 { '?' } else { '&' };
                    write!(
                        f,
                        "{}{}={}",
                        sep,
                        urlencoding::encode("types[]"),
                        urlencoding::encode(code.as_str())
                    )?;
                }
                Ok(())
            }
        }
    }
}
