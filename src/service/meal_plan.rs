use super::OperationError;
use crate::anylist::{new_identifier, AnyListApi, MealPlanEvent};
use crate::constants::DEFAULT_MEAL_TITLE;
use crate::validation::MealPlanRequest;
use tracing::info;

/// Schedules a recipe on the meal-plan calendar and returns the event identifier.
pub async fn add_to_meal_plan(
    client: &dyn AnyListApi,
    request: MealPlanRequest,
) -> Result<String, OperationError> {
    client.login().await?;

    let event = MealPlanEvent {
        identifier: new_identifier(),
        recipe_id: request.recipe_id,
        date: request.date,
        title: request
            .meal_type
            .unwrap_or_else(|| DEFAULT_MEAL_TITLE.to_string()),
    };

    client.save_event(&event).await?;
    info!(
        "Planned recipe {} on {} ({})",
        event.recipe_id, event.date, event.title
    );
    Ok(event.identifier)
}
