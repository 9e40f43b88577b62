use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use log::debug;

use crate::level::Level;
use crate::LoadLevel;

pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(path)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

impl<P: AsRef<Path> + ?Sized> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let path = self.as_ref();
        debug!("Loading level {}", path.display());
        let level: Level = read_file(path)?.parse()?;
        Ok(level)
    }
}
