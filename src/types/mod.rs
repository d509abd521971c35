mod document;
mod plugin;
mod value;

pub use document::{Document, Pipeline};
pub use plugin::{PluginClass, PluginInstance, Plugins, Properties, Property};
pub use value::{MarshalText, Map, Value};
