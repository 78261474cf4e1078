use anyhow::Result;

use nest_assembly::Assembly;

pub struct InfoHandler;

impl InfoHandler {
    pub fn handle_id(assembly: &Assembly) -> Result<()> {
        println!("{}", assembly.assembly_id());
        Ok(())
    }

    pub fn handle_out(assembly: &Assembly) -> Result<()> {
        println!("{}", assembly.output_dir().display());
        Ok(())
    }
}
