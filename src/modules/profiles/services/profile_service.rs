use std::sync::Arc;

use crate::core::{AppError, Result, Valid};
use crate::middleware::SessionContext;
use crate::modules::profiles::models::{
    CreateProfileRequest, UpdateProfileRequest, UserProfile,
};
use crate::modules::profiles::repositories::ProfileRepository;

/// User profile management
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// The caller's profile, or None when one was never created.
    pub async fn get_profile(&self, ctx: &SessionContext) -> Result<Option<UserProfile>> {
        self.profiles.find_by_user(&ctx.user_id).await
    }

    pub async fn create_profile(
        &self,
        ctx: &SessionContext,
        request: Valid<CreateProfileRequest>,
    ) -> Result<UserProfile> {
        if self.profiles.find_by_user(&ctx.user_id).await?.is_some() {
            return Err(AppError::validation("Profile already exists."));
        }

        let request = request.into_inner();
        let profile = UserProfile::new(
            ctx.user_id.clone(),
            request.company_name,
            request.address,
            request.phone,
            request.tax_number,
        );

        self.profiles.create(&profile).await?;

        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        ctx: &SessionContext,
        request: Valid<UpdateProfileRequest>,
    ) -> Result<UserProfile> {
        let mut profile = self
            .profiles
            .find_by_user(&ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        profile.apply(request.into_inner());
        self.profiles.update(&profile).await?;

        Ok(profile)
    }
}
