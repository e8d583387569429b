// Every feature module the shell can activate. A tenant only ever loads the
// subset it enables; adding a module means adding its manifest entry here.

use shellkit::{ManifestError, ModuleManifest};

pub fn build_manifest() -> Result<ModuleManifest, ManifestError> {
    Ok(ModuleManifest::builder()
        .with(core_module::manifest_entry())?
        .with(tickets_module::manifest_entry())?
        .with(workforce_module::manifest_entry())?
        .build())
}
