//! Request arguments for create and update.
//!
//! Arguments arrive as a flat JSON object assembled by the HTTP layer from the
//! query string and body. Each argument is coerced to its declared type; a
//! missing required argument or a value that cannot be coerced is reported with
//! the argument's help text. Arguments are checked in declaration order and the
//! first failure wins.

use serde_json::{Map, Value};

use crate::errors::ServiceError;
use super::repository::Video;

/// Raw argument bag, keyed by argument name.
pub type RawArgs = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Str,
    Int,
}

#[derive(Debug, Clone, Copy)]
pub struct Argument {
    pub name: &'static str,
    pub kind: ArgKind,
    pub help: &'static str,
    pub required: bool,
}

pub const NAME_HELP: &str = "Name of video is required";
pub const LIKES_HELP: &str = "Number of likes is required";
pub const VIEWS_HELP: &str = "views of video is required";

pub const VIDEO_PUT_ARGS: [Argument; 3] = [
    Argument { name: "name", kind: ArgKind::Str, help: NAME_HELP, required: true },
    Argument { name: "likes", kind: ArgKind::Int, help: LIKES_HELP, required: true },
    Argument { name: "views", kind: ArgKind::Int, help: VIEWS_HELP, required: true },
];

pub const VIDEO_UPDATE_ARGS: [Argument; 3] = [
    Argument { name: "name", kind: ArgKind::Str, help: NAME_HELP, required: false },
    Argument { name: "likes", kind: ArgKind::Int, help: LIKES_HELP, required: false },
    Argument { name: "views", kind: ArgKind::Int, help: VIEWS_HELP, required: false },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
}

impl Argument {
    fn error(&self) -> ServiceError {
        ServiceError::Argument { field: self.name, message: self.help.to_string() }
    }

    /// `Ok(None)` when the argument is absent (or null) and optional.
    pub fn parse(&self, args: &RawArgs) -> Result<Option<ArgValue>, ServiceError> {
        let value = match args.get(self.name) {
            None | Some(Value::Null) if self.required => return Err(self.error()),
            None | Some(Value::Null) => return Ok(None),
            Some(v) => v,
        };
        let parsed = match self.kind {
            ArgKind::Str => coerce_str(value).map(ArgValue::Str),
            ArgKind::Int => coerce_int(value).map(ArgValue::Int),
        };
        parsed.map(Some).ok_or_else(|| self.error())
    }
}

fn coerce_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Exclusive bound of the `i64` range as a float.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Floats are truncated toward zero and booleans count as 0 or 1. Strings must
/// hold a whole number.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let t = n.as_f64()?.trunc();
            (-I64_BOUND..I64_BOUND).contains(&t).then_some(t as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_name(name: &str) -> Result<(), ServiceError> {
    models::video::validate_name(name).map_err(|e| match e {
        models::errors::ModelError::Validation(message) => ServiceError::Argument { field: "name", message },
        other => other.into(),
    })
}

/// Parsed arguments of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub name: String,
    pub likes: i64,
    pub views: i64,
}

impl NewVideo {
    pub fn parse(args: &RawArgs) -> Result<Self, ServiceError> {
        let patch = VideoPatch::collect(&VIDEO_PUT_ARGS, args)?;
        match patch {
            VideoPatch { name: Some(name), likes: Some(likes), views: Some(views) } => {
                check_name(&name)?;
                Ok(Self { name, likes, views })
            }
            _ => Err(ServiceError::Validation("incomplete video arguments".into())),
        }
    }

    pub fn into_video(self, id: i64) -> Video {
        Video { id, name: self.name, views: self.views, likes: self.likes }
    }
}

/// Parsed arguments of an update request; `None` means not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPatch {
    pub name: Option<String>,
    pub likes: Option<i64>,
    pub views: Option<i64>,
}

impl VideoPatch {
    pub fn parse(args: &RawArgs) -> Result<Self, ServiceError> {
        let patch = Self::collect(&VIDEO_UPDATE_ARGS, args)?;
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        Ok(patch)
    }

    /// Parse `table` in order, routing each value to its field by argument name.
    fn collect(table: &[Argument], args: &RawArgs) -> Result<Self, ServiceError> {
        let mut patch = Self::default();
        for arg in table {
            let Some(value) = arg.parse(args)? else { continue };
            match (arg.name, value) {
                ("name", ArgValue::Str(s)) => patch.name = Some(s),
                ("likes", ArgValue::Int(i)) => patch.likes = Some(i),
                ("views", ArgValue::Int(i)) => patch.views = Some(i),
                (other, _) => return Err(ServiceError::Validation(format!("unexpected argument {other}"))),
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.likes.is_none() && self.views.is_none()
    }

    /// Assign every supplied field onto `video`.
    pub fn apply_to(self, video: &mut Video) {
        if let Some(name) = self.name {
            video.name = name;
        }
        if let Some(views) = self.views {
            video.views = views;
        }
        if let Some(likes) = self.likes {
            video.likes = likes;
        }
    }
}
