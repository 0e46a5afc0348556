/// Instruction template asking the completion service for a one-word intent.
pub fn intent_prompt(user_input: &str) -> String {
    format!(
        r#"You are a flight booking assistant. Analyze the user's message below and answer with exactly one of these intents:
- book
- cancel
- reschedule
- unknown

Rules:
1. Respond with only the intent word, no explanations, punctuation, or extra text.
2. If the message is unclear or unrelated to flight booking, answer "unknown".
3. Words like "book", "reserve", "schedule" map to book.
4. Words like "cancel", "remove", "delete reservation" map to cancel.
5. Words like "change", "modify", "reschedule" map to reschedule.
6. Do not invent intents beyond these four.

Examples:
1. "I want to book a flight to New York next Monday." -> book
2. "Please cancel my reservation for flight 123." -> cancel
3. "Can I change my flight from Friday to Sunday?" -> reschedule
4. "What is the weather like in Paris?" -> unknown

User message: "{user_input}"
Respond with the intent only."#
    )
}

/// Instruction template asking the completion service for one JSON object
/// with exactly the six slot keys.
pub fn slot_prompt(user_input: &str) -> String {
    format!(
        r#"You are an information extractor. Extract structured flight booking details from the user's message.

Return only one JSON object with the following keys, always including every key:
- passenger_name: string ("" if unknown)
- origin: string (IATA code like "BOM" or a city name; "" if unknown)
- destination: string (IATA code like "BLR" or a city name; "" if unknown)
- date: string (format "YYYY-MM-DD"; "" if unknown)
- time: string (format "HH:MM"; "" if unknown)
- booking_reference: string ("" if not provided)

Rules:
1. Output must be valid JSON only, no explanations or extra text.
2. If multiple dates or times are mentioned, choose the one most relevant to the flight.
3. Do not guess: when unsure, use "".

Example:
Input: "Book a ticket for Vaishak S from Mumbai to Bangalore on 10th October 2025 at 10:30 AM."
Output: {{"passenger_name":"Vaishak S","origin":"Mumbai","destination":"Bangalore","date":"2025-10-10","time":"10:30","booking_reference":""}}

User message:
"""{user_input}"""

Respond with the JSON object only."#
    )
}
