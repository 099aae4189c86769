/// Device directory - register and look up devices
use crate::error::{Result, ServerError};
use crate::services::search::{self, blank_as_none, SearchResult};
use serde::Deserialize;
use sqlx::SqlitePool;
use viking_core::{CreateDevice, Device, DeviceId};
use viking_storage::devices;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSearchParams {
    pub query: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<DeviceId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub serial_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSearch {
    All,
    ById(DeviceId),
    BySerialNumber(String),
    ByBrand(String),
}

impl TryFrom<DeviceSearchParams> for DeviceSearch {
    type Error = ServerError;

    fn try_from(params: DeviceSearchParams) -> Result<Self> {
        let query = search::discriminator(params.query.as_deref())?;

        match query.as_str() {
            "all" => Ok(Self::All),
            "by-id" => Ok(Self::ById(search::required(params.id, "ID", &query)?)),
            "by-serial-number" => Ok(Self::BySerialNumber(search::required_text(
                params.serial_number,
                "Serial number",
                &query,
            )?)),
            "by-brand" => Ok(Self::ByBrand(search::required_text(
                params.brand,
                "Brand",
                &query,
            )?)),
            _ => Err(search::unsupported(&query)),
        }
    }
}

pub struct DeviceDirectory {
    pool: SqlitePool,
}

impl DeviceDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, criteria: DeviceSearch) -> Result<SearchResult<Device>> {
        match criteria {
            DeviceSearch::All => Ok(SearchResult::Many(devices::get_all(&self.pool).await?)),
            DeviceSearch::ByBrand(brand) => Ok(SearchResult::Many(
                devices::get_by_brand(&self.pool, &brand).await?,
            )),
            DeviceSearch::ById(id) => devices::get_by_id(&self.pool, id)
                .await?
                .map(SearchResult::One)
                .ok_or_else(|| ServerError::NotFound(format!("Device with ID {id} not found"))),
            DeviceSearch::BySerialNumber(serial) => {
                devices::get_by_serial_number(&self.pool, &serial)
                    .await?
                    .map(SearchResult::One)
                    .ok_or_else(|| {
                        ServerError::NotFound(format!(
                            "Device with serial number {serial} not found"
                        ))
                    })
            }
        }
    }

    /// Register a device; serial number, brand and model must all be present
    pub async fn create(&self, device: CreateDevice) -> Result<Device> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let (Some(serial_number), Some(brand), Some(model)) = (
            present(&device.serial_number),
            present(&device.brand),
            present(&device.model),
        ) else {
            return Err(ServerError::BadRequest(
                "Serial number, brand, and model are required".to_string(),
            ));
        };

        let device = devices::insert(&self.pool, &serial_number, &brand, &model).await?;
        tracing::info!(
            device_id = device.id,
            serial_number = %device.serial_number,
            "Device registered"
        );

        Ok(device)
    }
}
