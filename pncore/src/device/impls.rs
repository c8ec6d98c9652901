use std::{
    fmt::{
        Display,
        Formatter,
        Result as FmtResult,
    },
    ops::{
        Deref,
        DerefMut,
    },
    str::FromStr,
};

use super::*;

impl CloudMessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fcm => "FCM",
            Self::Gcm => "GCM",
        }
    }
}

impl Display for CloudMessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudMessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FCM" => Ok(Self::Fcm),
            "GCM" => Ok(Self::Gcm),
            s => Err(format!("unknown cloud message type {s:?}")),
        }
    }
}

impl From<Vec<GcmDevice>> for GcmDevices {
    fn from(args: Vec<GcmDevice>) -> Self {
        Self(args)
    }
}

impl<const N: usize> From<[GcmDevice; N]> for GcmDevices {
    fn from(args: [GcmDevice; N]) -> Self {
        Self(args.into())
    }
}

impl Deref for GcmDevices {
    type Target = Vec<GcmDevice>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for GcmDevices {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoIterator for GcmDevices {
    type Item = GcmDevice;
    type IntoIter = std::vec::IntoIter<GcmDevice>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
