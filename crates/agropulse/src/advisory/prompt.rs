use super::domain::AdvisoryRequest;

const PREAMBLE: &str = "You are an expert agricultural advisor helping Indian farmers. \
     Provide practical, actionable advice in simple language.";

pub const DEFAULT_QUESTION: &str = "Based on my current farm data, what should I do today? \
     Provide irrigation, fertilizer, and selling recommendations.";

const NOT_SPECIFIED: &str = "Not specified";

fn or_unspecified(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Text sent to the upstream model: farm context, then the farmer's question.
pub fn build_prompt(request: &AdvisoryRequest) -> String {
    let mut prompt = format!(
        "{PREAMBLE}\n\nCurrent Farm Data:\n- Crop: {}\n- Growth Stage: {}",
        or_unspecified(&request.crop_type),
        or_unspecified(request.growth_stage.label()),
    );

    if let Some(weather) = &request.weather {
        prompt.push_str(&format!(
            "\n- Weather: {}, Temperature: {}°C, Humidity: {}%, Rainfall: {}mm",
            or_unspecified(&weather.description),
            weather.temperature,
            weather.humidity,
            weather.rainfall
        ));
    }

    if let Some(price) = &request.mandi_prices {
        prompt.push_str(&format!(
            "\n- Current Market Price: ₹{}/quintal at {}",
            price.modal_price,
            or_unspecified(&price.market)
        ));
    }

    let question = request.question_text().unwrap_or(DEFAULT_QUESTION);
    prompt.push_str("\n\nFarmer Question: ");
    prompt.push_str(question);
    prompt
}
