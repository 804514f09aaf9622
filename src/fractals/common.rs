use serde::{Deserialize, Serialize};

use super::newtons_method::NewtonsMethodParams;

#[derive(Serialize, Deserialize, Debug)]
pub enum FractalParams {
    NewtonsMethod(Box<NewtonsMethodParams>),
}
