use async_trait::async_trait;

/// Feature module: contributes capabilities to the registry for the current tenant.
///
/// Must only write through the context; registering nothing is valid.
/// Errors are reported per module and never abort other modules' loading.
#[async_trait]
pub trait RegistrationModule: Send + Sync + 'static {
    async fn register(&self, ctx: &crate::context::RegisterCtx) -> anyhow::Result<()>;
}
