use serde_json::Value;

use super::{GeoPosition, Mount, MountConnection};
use crate::transport::{SerialTransport, Transport};

/// Driver for iOptron mounts. Carries the base connection plus the site
/// position configured for the mount.
pub struct IoptronMount<T: Transport = SerialTransport> {
    connection: MountConnection<T>,
    position: GeoPosition,
}

impl<T: Transport + Default> IoptronMount<T> {
    pub fn new(config: Value) -> Self {
        Self {
            connection: MountConnection::new(config),
            position: GeoPosition::default(),
        }
    }
}

impl<T: Transport> IoptronMount<T> {
    pub fn with_transport(config: Value, transport: T) -> Self {
        Self {
            connection: MountConnection::with_transport(config, transport),
            position: GeoPosition::default(),
        }
    }

    pub fn set_position(&mut self, position: GeoPosition) {
        self.position = position;
    }

    pub fn connection(&self) -> &MountConnection<T> {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut MountConnection<T> {
        &mut self.connection
    }
}

impl<T: Transport> Mount for IoptronMount<T> {
    fn position(&self) -> GeoPosition {
        self.position
    }
}
