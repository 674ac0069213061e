// Models module - contains the Diagram record and its request/response shapes

pub mod diagram;

pub use diagram::{CreateDiagramRequest, DeleteDiagramResponse, Diagram, UpdateDiagramRequest};
