use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	Emitter::default()
		.add_instructions(&GitclBuilder::default().sha(true).build()?)?
		.add_instructions(&CargoBuilder::default().target_triple(true).build()?)?
		.emit()?;

	Ok(())
}
