//! Built-in sample dataset served when the endpoint is unreachable

use crate::logs::model::LogRecord;

/// Fixed sample logs: three request names over one morning
pub fn sample_logs() -> Vec<LogRecord> {
    vec![
        LogRecord::new(
            "2024-03-01T10:00:00",
            "GetBalance",
            150.0,
            200,
            "Успешное получение баланса",
        ),
        LogRecord::new(
            "2024-03-01T10:05:00",
            "GetBalance",
            180.0,
            200,
            "Успешное получение баланса",
        ),
        LogRecord::new(
            "2024-03-01T10:10:00",
            "GetBalance",
            120.0,
            500,
            "Ошибка сервера",
        ),
        LogRecord::new(
            "2024-03-01T10:15:00",
            "TransferMoney",
            250.0,
            200,
            "Успешный перевод",
        ),
        LogRecord::new(
            "2024-03-01T10:20:00",
            "TransferMoney",
            300.0,
            400,
            "Недостаточно средств",
        ),
        LogRecord::new(
            "2024-03-01T10:25:00",
            "GetTransactions",
            200.0,
            200,
            "Успешное получение транзакций",
        ),
        LogRecord::new(
            "2024-03-01T10:30:00",
            "GetTransactions",
            220.0,
            200,
            "Успешное получение транзакций",
        ),
        LogRecord::new(
            "2024-03-01T10:35:00",
            "GetTransactions",
            190.0,
            200,
            "Успешное получение транзакций",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_logs_shape() {
        let logs = sample_logs();
        assert_eq!(logs.len(), 8);
        assert_eq!(logs.iter().filter(|l| l.request_name == "GetBalance").count(), 3);
        assert_eq!(logs.iter().filter(|l| l.status_code != 200).count(), 2);
    }

    #[test]
    fn test_sample_descriptions_are_verbatim() {
        let logs = sample_logs();
        assert_eq!(logs[0].description, "Успешное получение баланса");
        assert_eq!(logs[2].description, "Ошибка сервера");
        assert_eq!(logs[3].description, "Успешный перевод");
        assert_eq!(logs[4].description, "Недостаточно средств");
        assert_eq!(logs[7].description, "Успешное получение транзакций");
    }
}
