use clap::ValueEnum;

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    Uk,
    En,
}

impl Locale {
    /// Parses the config spelling, falling back to the default for unknown values.
    pub fn from_config(value: &str) -> Self {
        Self::from_str(value, true).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Uk => "uk",
            Locale::En => "en",
        }
    }

    /// Translates a provider description; unknown phrases pass through.
    pub fn describe<'a>(&self, description: &'a str) -> &'a str {
        match self {
            Locale::En => description,
            Locale::Uk => UK_DESCRIPTIONS
                .iter()
                .find(|(en, _)| *en == description)
                .map_or(description, |&(_, uk)| uk),
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::Uk => &UK_LABELS,
            Locale::En => &EN_LABELS,
        }
    }
}

/// Emoji for a description, matched by keyword.
pub fn weather_emoji(description: &str) -> &'static str {
    let lower = description.to_lowercase();
    EMOJI
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or("🌡️", |&(_, emoji)| emoji)
}

/// User-facing strings.
#[derive(Debug)]
pub struct Labels {
    pub city: &'static str,
    pub temperature: &'static str,
    pub feels_like: &'static str,
    pub description: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub wind_unit: &'static str,
    pub pressure: &'static str,
    pub pressure_unit: &'static str,
    pub from_cache: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
    pub goodbye: &'static str,
    pub watch_goodbye: &'static str,
    pub watch_started: &'static str,
    pub watch_hint: &'static str,
    pub updated_at: &'static str,
    pub next_update: &'static str,
    pub seconds: &'static str,
    pub cache_cleared: &'static str,
    pub config_saved: &'static str,
    pub menu_prompt: &'static str,
    pub menu_enter_city: &'static str,
    pub menu_auto_detect: &'static str,
    pub menu_exit: &'static str,
    pub city_prompt: &'static str,
    pub city_empty: &'static str,
}

static UK_LABELS: Labels = Labels {
    city: "Місто",
    temperature: "Температура",
    feels_like: "Відчувається як",
    description: "Опис",
    humidity: "Вологість",
    wind: "Швидкість вітру",
    wind_unit: "км/год",
    pressure: "Тиск",
    pressure_unit: "мбар",
    from_cache: "📦 (дані з кешу)",
    loading: "🔄 Завантаження даних...",
    error: "Помилка",
    goodbye: "👋 Вихід",
    watch_goodbye: "👋 Вихід з режиму автооновлення",
    watch_started: "🔄 Режим автооновлення кожні",
    watch_hint: "Натисніть Ctrl+C для виходу",
    updated_at: "⏰ Оновлено",
    next_update: "⏳ Наступне оновлення через",
    seconds: "секунд",
    cache_cleared: "🧹 Кеш очищено",
    config_saved: "💾 Налаштування збережено",
    menu_prompt: "🌍 Оберіть спосіб визначення міста:",
    menu_enter_city: "Ввести назву міста",
    menu_auto_detect: "Автоматичне визначення за IP",
    menu_exit: "Вихід",
    city_prompt: "Введіть назву міста:",
    city_empty: "Назва міста не може бути порожньою",
};

static EN_LABELS: Labels = Labels {
    city: "City",
    temperature: "Temperature",
    feels_like: "Feels like",
    description: "Conditions",
    humidity: "Humidity",
    wind: "Wind speed",
    wind_unit: "km/h",
    pressure: "Pressure",
    pressure_unit: "mbar",
    from_cache: "📦 (cached data)",
    loading: "🔄 Loading weather...",
    error: "Error",
    goodbye: "👋 Bye",
    watch_goodbye: "👋 Leaving watch mode",
    watch_started: "🔄 Refreshing every",
    watch_hint: "Press Ctrl+C to exit",
    updated_at: "⏰ Updated",
    next_update: "⏳ Next update in",
    seconds: "seconds",
    cache_cleared: "🧹 Cache cleared",
    config_saved: "💾 Settings saved",
    menu_prompt: "🌍 How should the city be determined?",
    menu_enter_city: "Enter a city name",
    menu_auto_detect: "Detect automatically by IP",
    menu_exit: "Exit",
    city_prompt: "City name:",
    city_empty: "City name must not be empty",
};

const UK_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Clear", "Ясно"),
    ("Sunny", "Сонячно"),
    ("Partly cloudy", "Мінлива хмарність"),
    ("Cloudy", "Хмарно"),
    ("Overcast", "Похмуро"),
    ("Mist", "Туман"),
    ("Fog", "Густий туман"),
    ("Freezing fog", "Морозний туман"),
    ("Patchy rain possible", "Можливий дощ"),
    ("Patchy light rain", "Місцями легкий дощ"),
    ("Light rain", "Легкий дощ"),
    ("Moderate rain", "Помірний дощ"),
    ("Heavy rain", "Сильний дощ"),
    ("Light rain shower", "Легкий дощ"),
    ("Moderate or heavy rain shower", "Помірний або сильний дощ"),
    ("Torrential rain shower", "Злива"),
    ("Patchy light drizzle", "Місцями легка мряка"),
    ("Light drizzle", "Легка мряка"),
    ("Freezing drizzle", "Морозна мряка"),
    ("Heavy freezing drizzle", "Сильна морозна мряка"),
    ("Patchy snow possible", "Можливий сніг"),
    ("Patchy light snow", "Місцями легкий сніг"),
    ("Light snow", "Легкий сніг"),
    ("Moderate snow", "Помірний сніг"),
    ("Heavy snow", "Сильний сніг"),
    ("Blowing snow", "Хуртовина"),
    ("Blizzard", "Заметіль"),
    ("Light snow showers", "Легкий снігопад"),
    ("Moderate or heavy snow showers", "Помірний або сильний снігопад"),
    ("Patchy sleet possible", "Можливий мокрий сніг"),
    ("Light sleet", "Легкий мокрий сніг"),
    ("Moderate or heavy sleet", "Помірний або сильний мокрий сніг"),
    ("Light sleet showers", "Легкий мокрий сніг"),
    ("Moderate or heavy sleet showers", "Помірний або сильний мокрий сніг"),
    ("Ice pellets", "Крижана крупа"),
    ("Light showers of ice pellets", "Легка крижана крупа"),
    ("Moderate or heavy showers of ice pellets", "Помірна або сильна крижана крупа"),
    ("Patchy light rain with thunder", "Місцями легкий дощ з грозою"),
    ("Moderate or heavy rain with thunder", "Помірний або сильний дощ з грозою"),
    ("Patchy light snow with thunder", "Місцями легкий сніг з грозою"),
    ("Moderate or heavy snow with thunder", "Помірний або сильний сніг з грозою"),
    ("Thundery outbreaks possible", "Можливі грози"),
];

// Checked in order, so more specific keywords come first.
const EMOJI: &[(&str, &str)] = &[
    ("thunder", "⛈️"),
    ("blizzard", "🌨️"),
    ("sleet", "🌨️"),
    ("snow", "❄️"),
    ("drizzle", "🌦️"),
    ("shower", "🌦️"),
    ("rain", "🌧️"),
    ("mist", "🌫️"),
    ("fog", "🌫️"),
    ("partly", "⛅"),
    ("cloudy", "☁️"),
    ("overcast", "☁️"),
    ("clear", "☀️"),
    ("sunny", "☀️"),
];
