//! Static translation tables, one per supported language.
//!
//! Russian is the default table and must hold every key the English table has.

pub(super) const RU: &[(&str, &str)] = &[
    // --- General ---
    ("choose_action", "Выберите действие:"),
    ("unknown_cmd", "Неизвестная команда"),
    ("request_failed", "⚠️ Не удалось выполнить запрос, попробуйте позже"),
    // --- Commands ---
    ("help_cmd", "🆘 Помощь"),
    ("info_cmd", "📱 Моя информация"),
    ("start_cmd", "🚀 Начать"),
    ("send_geo", "📍 Отправить местоположение или координаты (широта, долгота)"),
    ("send_geo_cmd", "Получить список камер в радиусе 500м"),
    // --- User info ---
    ("user_info", "📱 Информация о пользователе"),
    ("name", "👤 Имя"),
    ("email", "📧 Почта"),
    ("role", "🎭 Роль"),
    ("language", "🌐 Язык"),
    ("telegram_id", "📱 Telegram ID"),
    ("phone", "📞 Телефон"),
    ("last_update", "🕒 Последнее обновление"),
    // --- Cameras ---
    ("cameras_list", "📸 Список камер в радиусе 500м"),
    ("address", "📍 Адрес"),
    ("title", "🏷️ Название"),
    ("distance", "🔍 Расстояние"),
    ("meter", "м"),
    ("no_cameras", "Камеры не найдены в радиусе 500м"),
];

pub(super) const EN: &[(&str, &str)] = &[
    // --- General ---
    ("choose_action", "Choose action:"),
    ("unknown_cmd", "Unknown command"),
    ("request_failed", "⚠️ Could not complete the request, please try again later"),
    // --- Commands ---
    ("help_cmd", "🆘 Help"),
    ("info_cmd", "📱 My Information"),
    ("start_cmd", "🚀 Start"),
    ("send_geo", "📍 Send Location or coordinates (latitude, longitude)"),
    ("send_geo_cmd", "Get cameras list in 500m radius"),
    // --- User info ---
    ("user_info", "📱 User Information"),
    ("name", "👤 Name"),
    ("email", "📧 Email"),
    ("role", "🎭 Role"),
    ("language", "🌐 Language"),
    ("telegram_id", "📱 Telegram ID"),
    ("phone", "📞 Phone"),
    ("last_update", "🕒 Last Update"),
    // --- Cameras ---
    ("cameras_list", "📸 Cameras List in 500m radius"),
    ("address", "📍 Address"),
    ("title", "🏷️ Title"),
    ("distance", "🔍 Distance"),
    ("meter", "m"),
    ("no_cameras", "No cameras found in 500m radius"),
];
